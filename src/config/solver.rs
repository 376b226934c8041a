use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_SOLVER_BUDGET_SECS;

fn default_budget_secs() -> u64 {
    DEFAULT_SOLVER_BUDGET_SECS
}

/// Constraint scheduler (C5) tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Wall-clock cap for a single solve call.
    #[serde(default = "default_budget_secs")]
    pub time_budget_secs: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: default_budget_secs(),
        }
    }
}
