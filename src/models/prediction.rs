use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Predicted total sales for a single date. Most-recent-write-wins when
/// upserted; immutable otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub predicted_sales: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRangeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
