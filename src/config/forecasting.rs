use serde::{Deserialize, Serialize};

use super::ConfigError;

fn default_model_path() -> String {
    "model/sales_model.json".to_string()
}

/// Sales forecaster (C2) configuration: where the frozen model artifact
/// lives on disk. The model itself is an opaque blob from the engine's
/// perspective — see `forecasting::model` for the load/score capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastingConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

impl Default for ForecastingConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

impl ForecastingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_path.is_empty() {
            return Err(ConfigError::Validation(
                "forecasting.model_path cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
