/// Errors surfaced by the sales forecaster (C2).
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("forecasting model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature row does not match model expectations: {0}")]
    FeatureMismatch(String),

    #[error("weather provider returned no data for the requested range")]
    WeatherUnavailable,
}
