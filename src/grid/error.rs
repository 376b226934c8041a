/// Errors surfaced by the scheduling grid builder (C4).
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("end date is before start date")]
    InvalidRange,

    #[error(transparent)]
    Db(#[from] crate::db::DbError),

    #[error(transparent)]
    Forecast(#[from] crate::forecasting::ForecastError),

    #[error(transparent)]
    Provider(#[from] crate::provider::ProviderError),
}
