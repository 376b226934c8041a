use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::error::ForecastError;
use super::features::FeatureRow;

/// A frozen linear regression model: coefficients keyed by feature name,
/// an intercept, and the categorical encoding used for `season` at
/// training time. The model is an opaque blob from the engine's
/// perspective — this struct is the smallest capability that satisfies
/// `{load(artifact), score(feature_row) -> number}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesModel {
    coefficients: HashMap<String, f64>,
    intercept: f64,
    season_codes: HashMap<String, f64>,
}

impl SalesModel {
    /// Load a model artifact from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ForecastError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ForecastError::ModelUnavailable(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ForecastError> {
        serde_json::from_str(contents)
            .map_err(|e| ForecastError::ModelUnavailable(format!("malformed model artifact: {e}")))
    }

    /// Apply the frozen model to a feature row, returning predicted
    /// sales for that date.
    pub fn score(&self, row: &FeatureRow) -> Result<f64, ForecastError> {
        let season_code = *self.season_codes.get(row.season.label()).ok_or_else(|| {
            ForecastError::FeatureMismatch(format!(
                "season encoder has no entry for '{}'",
                row.season.label()
            ))
        })?;

        let features: [(&str, f64); 10] = [
            ("weekday_index", row.weekday_index as f64),
            ("month", row.month as f64),
            ("day", row.day as f64),
            ("iso_year", row.iso_year as f64),
            ("iso_week", row.iso_week as f64),
            ("is_festival", row.is_festival as i32 as f64),
            ("season", season_code),
            ("weather_code", row.weather_code as f64),
            ("temperature", row.temperature),
            ("rain", row.rain),
        ];

        let mut total = self.intercept;
        for (name, value) in features {
            let coefficient = self.coefficients.get(name).ok_or_else(|| {
                ForecastError::FeatureMismatch(format!("model has no coefficient for '{name}'"))
            })?;
            total += coefficient * value;
        }

        // snowfall is rare enough in the training set that some frozen
        // artifacts omit it; treat it as optional.
        if let Some(coefficient) = self.coefficients.get("snowfall") {
            total += coefficient * row.snowfall;
        }

        Ok(total.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecasting::features::Season;
    use chrono::NaiveDate;

    fn sample_model() -> SalesModel {
        SalesModel::from_json(
            r#"{
                "coefficients": {
                    "weekday_index": 1000.0,
                    "month": 0.0,
                    "day": 0.0,
                    "iso_year": 0.0,
                    "iso_week": 0.0,
                    "is_festival": 20000.0,
                    "season": 500.0,
                    "weather_code": 0.0,
                    "temperature": 300.0,
                    "rain": -100.0,
                    "snowfall": -50.0
                },
                "intercept": 50000.0,
                "season_codes": {
                    "winter": 0.0,
                    "spring": 1.0,
                    "summer": 2.0,
                    "autumn": 3.0
                }
            }"#,
        )
        .unwrap()
    }

    fn row(date: &str, is_festival: bool) -> FeatureRow {
        let date: NaiveDate = date.parse().unwrap();
        FeatureRow::build(date, is_festival, None)
    }

    #[test]
    fn scores_a_basic_row() {
        let model = sample_model();
        let predicted = model.score(&row("2026-01-05", false)).unwrap();
        assert!(predicted > 0.0);
    }

    #[test]
    fn festival_day_increases_prediction() {
        let model = sample_model();
        let plain = model.score(&row("2026-06-15", false)).unwrap();
        let festival = model.score(&row("2026-06-15", true)).unwrap();
        assert!(festival > plain);
    }

    #[test]
    fn missing_season_code_is_feature_mismatch() {
        let model = SalesModel::from_json(
            r#"{
                "coefficients": {},
                "intercept": 0.0,
                "season_codes": {"winter": 0.0}
            }"#,
        )
        .unwrap();
        let err = model.score(&row("2026-06-15", false)).unwrap_err();
        assert!(matches!(err, ForecastError::FeatureMismatch(_)));
        let _ = Season::Summer;
    }

    #[test]
    fn malformed_artifact_is_model_unavailable() {
        let err = SalesModel::from_json("not json").unwrap_err();
        assert!(matches!(err, ForecastError::ModelUnavailable(_)));
    }
}
