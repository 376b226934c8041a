use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::DbResult;
use crate::models::{NewShiftPreference, ShiftPreference};

/// Persistence for per-day shift preferences. At most one record per
/// (staff_id, date); upsert replaces the flags on conflict.
#[async_trait]
pub trait ShiftPreferenceRepo: Send + Sync {
    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<ShiftPreference>>;
    async fn upsert(&self, preference: NewShiftPreference) -> DbResult<ShiftPreference>;
}
