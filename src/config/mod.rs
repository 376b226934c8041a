//! Configuration for the scheduling engine.
//!
//! The service is configured via a TOML file, with environment variable
//! interpolation using `${VAR_NAME}` syntax.
//!
//! # Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "${DATA_DIR}/shiftgrid.db"
//!
//! [weather]
//! latitude = 35.6762
//! longitude = 139.6503
//! ```

mod database;
mod forecasting;
mod observability;
mod server;
mod solver;
mod weather;

use std::path::Path;

pub use database::DatabaseConfig;
pub use forecasting::ForecastingConfig;
pub use observability::ObservabilityConfig;
pub use server::ServerConfig;
pub use solver::SolverConfig;
pub use weather::{RetryConfig, WeatherConfig};

use serde::{Deserialize, Serialize};

/// Root configuration for the scheduling engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub weather: WeatherConfig,
    #[serde(default)]
    pub forecasting: ForecastingConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;
        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        let mut config: EngineConfig = toml::from_str(&expanded).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.weather.validate()?;
        self.forecasting.validate()?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Expand environment variables in the format `${VAR_NAME}`.
/// Skips commented lines (content after a `#` on the same line).
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        let comment_pos = line.find('#');
        let mut line_result = String::with_capacity(line.len());
        let mut last_end = 0;

        for cap in re.captures_iter(line) {
            let match_start = cap.get(0).unwrap().start();
            if let Some(pos) = comment_pos
                && match_start >= pos
            {
                continue;
            }

            line_result.push_str(&line[last_end..match_start]);
            let var_name = &cap[1];
            let value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
            line_result.push_str(&value);
            last_end = cap.get(0).unwrap().end();
        }

        line_result.push_str(&line[last_end..]);
        result.push_str(&line_result);
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> &'static str {
        r#"
        [database]
        path = ":memory:"

        [weather]
        latitude = 35.0
        longitude = 139.0
        "#
    }

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config = EngineConfig::from_str(minimal_config()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.solver.time_budget_secs, 10);
        assert_eq!(config.weather.timezone, "Asia/Tokyo");
    }

    #[test]
    fn env_var_expansion() {
        temp_env::with_var("SHIFTGRID_DB_PATH", Some("/tmp/shiftgrid.db"), || {
            let result = expand_env_vars("path = \"${SHIFTGRID_DB_PATH}\"").unwrap();
            assert_eq!(result, "path = \"/tmp/shiftgrid.db\"");
        });
    }

    #[test]
    fn env_var_in_comment_ignored() {
        let result = expand_env_vars("# path = \"${NONEXISTENT_VAR}\"").unwrap();
        assert_eq!(result, "# path = \"${NONEXISTENT_VAR}\"");
    }

    #[test]
    fn missing_env_var_errors() {
        let err = expand_env_vars("path = \"${SHIFTGRID_DEFINITELY_UNSET}\"").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let config = format!("{}\nbogus_top_level = true\n", minimal_config());
        let err = EngineConfig::from_str(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn database_path_cannot_be_empty() {
        let config = r#"
        [database]
        path = ""

        [weather]
        latitude = 35.0
        longitude = 139.0
        "#;
        let err = EngineConfig::from_str(config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
