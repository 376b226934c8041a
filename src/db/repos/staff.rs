use async_trait::async_trait;

use crate::db::DbResult;
use crate::models::{NewStaff, Staff, StaffPatch};

/// Persistence for staff records. Server-assigned ids start at 1001 and
/// increase monotonically; delete cascades to that staff's preferences.
#[async_trait]
pub trait StaffRepo: Send + Sync {
    async fn list(&self) -> DbResult<Vec<Staff>>;
    async fn get(&self, id: i64) -> DbResult<Staff>;
    async fn create(&self, fields: NewStaff) -> DbResult<Staff>;
    async fn update(&self, id: i64, patch: StaffPatch) -> DbResult<Staff>;
    async fn delete(&self, id: i64) -> DbResult<()>;
}
