use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::EngineError;

/// Error envelope returned on every non-2xx response: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper around [`EngineError`] that knows how to render itself as
/// an HTTP response. Kept separate from `EngineError` so the engine crate
/// stays free of any axum dependency.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            EngineError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            EngineError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            EngineError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            EngineError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            // Assignment handlers intercept `NoSchedule` themselves and
            // respond with `200 []` per the API contract (see
            // `api::assignments`); this arm only covers a caller that
            // forgot to do so.
            EngineError::NoSchedule => (
                StatusCode::OK,
                "no feasible schedule exists for the requested range".to_string(),
            ),
            EngineError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
