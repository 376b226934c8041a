use crate::db::DbError;
use crate::forecasting::ForecastError;
use crate::grid::GridError;
use crate::provider::ProviderError;
use crate::scheduler::SolverError;

/// Unified error taxonomy surfaced to the API layer: every module's
/// error collapses into one of these before it reaches a route handler.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("upstream dependency unavailable: {0}")]
    Unavailable(String),

    #[error("no feasible schedule exists for the requested range")]
    NoSchedule,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => EngineError::NotFound,
            DbError::Conflict(msg) => EngineError::Conflict(msg),
            DbError::Validation(msg) => EngineError::BadRequest(msg),
            DbError::Sqlx(e) => EngineError::Internal(e.to_string()),
            DbError::Migration(e) => EngineError::Internal(e.to_string()),
        }
    }
}

impl From<ProviderError> for EngineError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Request(_) | ProviderError::Empty => {
                EngineError::Unavailable(err.to_string())
            }
            ProviderError::InvalidRange(_, _) => EngineError::BadRequest(err.to_string()),
        }
    }
}

impl From<ForecastError> for EngineError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::ModelUnavailable(_) => EngineError::Unavailable(err.to_string()),
            ForecastError::FeatureMismatch(_) => EngineError::Internal(err.to_string()),
            ForecastError::WeatherUnavailable => EngineError::Unavailable(err.to_string()),
        }
    }
}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidRange => EngineError::BadRequest(err.to_string()),
            GridError::Db(e) => e.into(),
            GridError::Forecast(e) => e.into(),
            GridError::Provider(e) => e.into(),
        }
    }
}

impl From<SolverError> for EngineError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::NoSchedule => EngineError::NoSchedule,
            SolverError::Internal(msg) => EngineError::Internal(msg),
        }
    }
}
