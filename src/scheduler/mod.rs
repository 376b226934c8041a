//! Constraint scheduler (C5): turns a decision grid into a concrete
//! shift assignment via a mixed-integer program solved with CBC.

mod constraints;
mod error;
mod solver;

pub use error::SolverError;
pub use solver::solve;
