/// Errors surfaced by the calendar/weather provider (C1).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather provider returned no data for the requested range")]
    Empty,

    #[error("invalid date range: start {0} is after end {1}")]
    InvalidRange(chrono::NaiveDate, chrono::NaiveDate),
}
