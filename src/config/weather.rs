use serde::{Deserialize, Serialize};

use super::ConfigError;

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_max_retries() -> u32 {
    5
}

fn default_initial_delay_ms() -> u64 {
    200
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Calendar/weather provider configuration (C1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// How long a successful per-range weather fetch stays cached.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    pub retry: RetryConfig,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            latitude: 35.6762,
            longitude: 139.6503,
            timezone: default_timezone(),
            cache_ttl_secs: default_cache_ttl_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl WeatherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "weather.base_url cannot be empty".into(),
            ));
        }
        self.retry.validate()
    }
}

/// Exponential backoff parameters for the weather HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backoff_multiplier < 1.0 {
            return Err(ConfigError::Validation(
                "weather.retry.backoff_multiplier must be >= 1.0".into(),
            ));
        }
        Ok(())
    }

    /// Delay before attempt `n` (0-indexed), with full jitter in [0, delay].
    pub fn delay_for_attempt(&self, attempt: u32) -> std::time::Duration {
        let base = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let capped = base.min(self.max_delay_ms as f64);
        let jittered = rand::Rng::gen_range(&mut rand::thread_rng(), 0.0..=capped);
        std::time::Duration::from_millis(jittered as u64)
    }
}
