//! Repository layer (C3): the narrow persistence interface the engine
//! depends on, plus a SQLite implementation and the pool that wires them
//! together.

pub mod error;
pub mod repos;
pub mod sqlite;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use error::{DbError, DbResult};
pub use repos::{AssignmentRepo, DailyPredictionRepo, ShiftPreferenceRepo, StaffRepo};

use crate::config::DatabaseConfig;

/// The repository pool, holding one trait object per entity. The engine
/// and API handlers depend only on these trait objects, never on the
/// concrete SQLite types, so a different backend could be substituted
/// without touching calling code.
#[derive(Clone)]
pub struct DbPool {
    pool: SqlitePool,
    pub staff: Arc<dyn StaffRepo>,
    pub preferences: Arc<dyn ShiftPreferenceRepo>,
    pub predictions: Arc<dyn DailyPredictionRepo>,
    pub assignments: Arc<dyn AssignmentRepo>,
}

impl DbPool {
    pub async fn from_config(config: &DatabaseConfig) -> DbResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.path)
            .map_err(DbError::Sqlx)?
            .create_if_missing(config.create_if_missing)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        if config.wal_mode {
            options = options.journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations_sqlx/sqlite").run(&pool).await?;
        }

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            staff: Arc::new(sqlite::SqliteStaffRepo::new(pool.clone())),
            preferences: Arc::new(sqlite::SqliteShiftPreferenceRepo::new(pool.clone())),
            predictions: Arc::new(sqlite::SqliteDailyPredictionRepo::new(pool.clone())),
            assignments: Arc::new(sqlite::SqliteAssignmentRepo::new(pool.clone())),
            pool,
        }
    }

    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
