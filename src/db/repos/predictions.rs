use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::DbResult;
use crate::models::DailyPrediction;

/// Persistence for per-day sales predictions. Most-recent write wins.
#[async_trait]
pub trait DailyPredictionRepo: Send + Sync {
    async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<DailyPrediction>>;
    async fn upsert_many(&self, predictions: Vec<DailyPrediction>) -> DbResult<()>;
}
