use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> StatusCode {
    match state.db.health_check().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
