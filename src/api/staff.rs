use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use validator::Validate;

use crate::engine::EngineError;
use crate::models::{NewStaff, Staff, StaffPatch};

use super::AppState;
use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", get(list_staff).post(create_staff))
        .route(
            "/staff/{id}",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
}

async fn list_staff(State(state): State<AppState>) -> Result<Json<Vec<Staff>>, ApiError> {
    Ok(Json(state.db.staff.list().await?))
}

async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Staff>, ApiError> {
    Ok(Json(state.db.staff.get(id).await?))
}

async fn create_staff(
    State(state): State<AppState>,
    Json(fields): Json<NewStaff>,
) -> Result<(StatusCode, Json<Staff>), ApiError> {
    fields
        .validate()
        .map_err(|e| ApiError::from(EngineError::BadRequest(e.to_string())))?;
    let staff = state.db.staff.create(fields).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<StaffPatch>,
) -> Result<Json<Staff>, ApiError> {
    patch
        .validate()
        .map_err(|e| ApiError::from(EngineError::BadRequest(e.to_string())))?;
    let staff = state.db.staff.update(id, patch).await?;
    Ok(Json(staff))
}

async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.staff.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
