/// Errors surfaced by the constraint scheduler (C5).
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// No assignment exists (or the solver could not find one within its
    /// wall-clock budget) that satisfies every hard constraint.
    #[error("no feasible schedule exists for the requested range")]
    NoSchedule,

    #[error("solver backend failure: {0}")]
    Internal(String),
}
