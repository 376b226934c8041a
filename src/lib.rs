//! `shiftgrid`: a workforce scheduling engine for a single retail/
//! hospitality store.
//!
//! Given a roster of staff, their per-day availability preferences, and
//! a per-day sales forecast, the engine builds an hour-by-hour decision
//! grid and solves it with a constraint program to produce a shift
//! assignment that satisfies legal/skill constraints, respects a
//! staffing-cost ceiling derived from predicted revenue, and minimizes
//! use of a synthetic "overflow" worker standing in for unfilled demand.
//!
//! Module map, leaves first:
//! - [`provider`] (C1) — festival calendar and weather features.
//! - [`forecasting`] (C2) — sales prediction from a frozen regression model.
//! - [`db`] (C3) — the repository interface and its SQLite implementation.
//! - [`grid`] (C4) — fuses staff, preferences, and predicted sales into
//!   the per-(staff,date,hour) decision grid.
//! - [`scheduler`] (C5) — the constraint-programming model and solver.
//! - [`engine`] — the state machine that drives one scheduling run
//!   end-to-end, wiring C1 through C5 together with persistence.
//! - [`api`] (C6) — the HTTP adapter.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod forecasting;
pub mod grid;
pub mod models;
pub mod provider;
pub mod scheduler;
