use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hour of a finalized, persisted shift assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub date: NaiveDate,
    pub hour: u32,
    pub staff_id: i64,
    pub name: String,
    pub level: i32,
    pub status: String,
    pub salary: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRangeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
