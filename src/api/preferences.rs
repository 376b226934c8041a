use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::models::{NewShiftPreference, ShiftPreference};

use super::AppState;
use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/shift_pre", post(upsert_preference))
}

async fn upsert_preference(
    State(state): State<AppState>,
    Json(fields): Json<NewShiftPreference>,
) -> Result<(StatusCode, Json<ShiftPreference>), ApiError> {
    let preference = state.db.preferences.upsert(fields).await?;
    Ok((StatusCode::CREATED, Json(preference)))
}
