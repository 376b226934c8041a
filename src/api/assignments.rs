use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::engine::{self, EngineError};
use crate::models::{Assignment, AssignmentRangeRequest};

use super::AppState;
use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shift_ass", post(run_schedule))
        .route("/shift_ass_dash_board", get(dashboard))
        .route("/shift_ass_data_main", get(list_in_range))
}

/// Build the decision grid, solve it, and persist the result.
///
/// Per the API contract, a solver failure (`NoSchedule`) is reported as
/// `200` with an empty array rather than an error — clients always get
/// a JSON array back from this endpoint.
async fn run_schedule(
    State(state): State<AppState>,
    Json(range): Json<AssignmentRangeRequest>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    match engine::run(
        range.start_date,
        range.end_date,
        &state.db,
        &state.weather,
        &state.model,
        &state.solver,
    )
    .await
    {
        Ok(assignments) => Ok(Json(assignments)),
        Err(EngineError::NoSchedule) => Ok(Json(Vec::new())),
        Err(err) => Err(ApiError::from(err)),
    }
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, ApiError> {
    let today = Utc::now().date_naive();
    let tomorrow = today + Duration::days(1);
    Ok(Json(state.db.assignments.list_in_range(today, tomorrow).await?))
}

#[derive(Debug, Deserialize)]
struct AssignmentRangeQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

async fn list_in_range(
    State(state): State<AppState>,
    Query(query): Query<AssignmentRangeQuery>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) else {
        return Err(ApiError::from(EngineError::BadRequest(
            "start_date and end_date are required".to_string(),
        )));
    };
    if start_date > end_date {
        return Err(ApiError::from(EngineError::BadRequest(
            "end_date is before start_date".to_string(),
        )));
    }

    Ok(Json(
        state.db.assignments.list_in_range(start_date, end_date).await?,
    ))
}
