use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::engine::EngineError;
use crate::forecasting;
use crate::models::{DailyPrediction, PredictionRangeRequest};
use crate::provider::festivals_in_range;

use super::AppState;
use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/pred_sales", get(recent_predictions).post(forecast_range))
}

/// Force a fresh forecast for `[start_date, end_date]`, overwriting any
/// existing predictions for those dates (most-recent-write-wins).
async fn forecast_range(
    State(state): State<AppState>,
    Json(range): Json<PredictionRangeRequest>,
) -> Result<(StatusCode, Json<Vec<DailyPrediction>>), ApiError> {
    if range.start_date > range.end_date {
        return Err(ApiError::from(EngineError::BadRequest(
            "end_date is before start_date".to_string(),
        )));
    }

    let festival_flags: HashMap<_, _> =
        festivals_in_range(range.start_date, range.end_date).into_iter().collect();
    let weather = state
        .weather
        .weather_in_range(range.start_date, range.end_date)
        .await
        .map_err(EngineError::from)?;

    let predictions = forecasting::predict_daily_sales(
        range.start_date,
        range.end_date,
        &festival_flags,
        &weather,
        &state.model,
    )
    .map_err(EngineError::from)?;

    state.db.predictions.upsert_many(predictions.clone()).await?;

    Ok((StatusCode::CREATED, Json(predictions)))
}

/// Predictions already on file for `today - 1 .. today + 7`.
async fn recent_predictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyPrediction>>, ApiError> {
    let today = Utc::now().date_naive();
    let start = today
        .pred_opt()
        .expect("scheduling ranges stay well within chrono's representable dates");
    let end = today + chrono::Duration::days(7);
    Ok(Json(state.db.predictions.get_range(start, end).await?))
}
