use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::DbResult;
use crate::models::Assignment;

/// Persistence for finalized shift assignments.
#[async_trait]
pub trait AssignmentRepo: Send + Sync {
    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Assignment>>;

    /// Atomically delete all assignments in [start, end] and insert the
    /// given rows in their place, within a single transaction.
    async fn replace_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        assignments: Vec<Assignment>,
    ) -> DbResult<()>;
}
