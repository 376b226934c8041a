//! Scheduling engine: the state machine that drives one scheduling run
//! from a date range to a persisted shift assignment, wiring together
//! the calendar/weather provider (C1), the sales forecaster (C2), the
//! repository layer (C3), the grid builder (C4), and the constraint
//! scheduler (C5).

mod error;

pub use error::EngineError;

use chrono::NaiveDate;

use crate::config::SolverConfig;
use crate::db::DbPool;
use crate::forecasting::SalesModel;
use crate::grid;
use crate::models::Assignment;
use crate::provider::WeatherProvider;
use crate::scheduler;

/// Progress of one scheduling run. Exposed for logging; callers only
/// ever see the terminal `Ok`/`Err` of [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    New,
    GridBuilt,
    Solved,
    Failed,
}

/// Run the full scheduling pipeline for `[start, end]`: build the
/// decision grid, solve for an assignment, and atomically persist it.
///
/// Returns the assignments that were written, sorted by
/// (date, hour, staff_id).
#[tracing::instrument(skip(db, provider, model, solver_config), fields(start = %start, end = %end))]
pub async fn run(
    start: NaiveDate,
    end: NaiveDate,
    db: &DbPool,
    provider: &WeatherProvider,
    model: &SalesModel,
    solver_config: &SolverConfig,
) -> Result<Vec<Assignment>, EngineError> {
    let mut state = RunState::New;

    let decision_grid = grid::build(start, end, db, provider, model).await?;
    state = RunState::GridBuilt;
    tracing::debug!(rows = decision_grid.len(), ?state, "decision grid built");

    let assignments = match scheduler::solve(&decision_grid, solver_config.time_budget_secs) {
        Ok(assignments) => assignments,
        Err(err) => {
            state = RunState::Failed;
            tracing::warn!(?state, error = %err, "scheduling run failed");
            return Err(err.into());
        }
    };
    state = RunState::Solved;
    tracing::info!(
        ?state,
        assignments = assignments.len(),
        "scheduling run solved"
    );

    db.assignments
        .replace_in_range(start, end, assignments.clone())
        .await?;

    Ok(assignments)
}
