use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "info".to_string()
}

/// Logging configuration. JSON output is typically enabled in
/// production; pretty output is easier to read during development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}
