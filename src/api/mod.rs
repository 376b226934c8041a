//! API surface (C6): thin adapter mapping HTTP requests to engine calls
//! and engine/repository results to JSON.

mod assignments;
mod error;
mod health;
mod predictions;
mod preferences;
mod staff;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;

use crate::config::SolverConfig;
use crate::db::DbPool;
use crate::forecasting::SalesModel;
use crate::provider::WeatherProvider;

/// Shared state handed to every route handler: the repository pool and
/// the two upstream collaborators (C1/C2) the grid builder needs when a
/// scheduling run has to forecast on demand.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub weather: Arc<WeatherProvider>,
    pub model: Arc<SalesModel>,
    pub solver: SolverConfig,
}

/// Assemble the full HTTP router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(staff::routes())
        .merge(preferences::routes())
        .merge(predictions::routes())
        .merge(assignments::routes())
        .with_state(state)
}
