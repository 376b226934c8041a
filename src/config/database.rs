use serde::{Deserialize, Serialize};

use super::ConfigError;

fn default_true() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

/// SQLite persistence configuration.
///
/// The engine always requires a database: staff, preferences, predictions,
/// and assignments are the system of record, not a cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Use `:memory:` for tests.
    pub path: String,

    #[serde(default = "default_true")]
    pub create_if_missing: bool,

    #[serde(default = "default_true")]
    pub run_migrations: bool,

    #[serde(default = "default_true")]
    pub wal_mode: bool,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "shiftgrid.db".to_string(),
            create_if_missing: true,
            run_migrations: true,
            wal_mode: true,
            busy_timeout_ms: default_busy_timeout_ms(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_empty() {
            return Err(ConfigError::Validation(
                "database.path cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
