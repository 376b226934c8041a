//! Sales forecaster (C2): turns festival flags and weather into
//! per-day predicted sales, and spreads a day's total across hours.

mod error;
mod features;
mod model;

pub use error::ForecastError;
pub use features::{FeatureRow, Season};
pub use model::SalesModel;

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{constants::intraday_profile, DailyPrediction};
use crate::provider::WeatherDay;

/// Predict daily sales for every date in `[start, end]`, inclusive.
///
/// `festival_flags` and `weather` need not cover every date in the
/// range; missing entries fall back to "not a festival" and "no
/// weather data" respectively, matching `FeatureRow::build`.
pub fn predict_daily_sales(
    start: NaiveDate,
    end: NaiveDate,
    festival_flags: &HashMap<NaiveDate, bool>,
    weather: &[WeatherDay],
    model: &SalesModel,
) -> Result<Vec<DailyPrediction>, ForecastError> {
    if weather.is_empty() {
        return Err(ForecastError::WeatherUnavailable);
    }

    let weather_by_date: HashMap<NaiveDate, &WeatherDay> =
        weather.iter().map(|w| (w.date, w)).collect();

    let mut predictions = Vec::new();
    let mut date = start;
    while date <= end {
        let is_festival = festival_flags.get(&date).copied().unwrap_or(false);
        let row = FeatureRow::build(date, is_festival, weather_by_date.get(&date).copied());
        let predicted_sales = model.score(&row)?;
        predictions.push(DailyPrediction {
            date,
            predicted_sales,
        });
        date = date
            .succ_opt()
            .expect("scheduling ranges stay well within chrono's representable dates");
    }

    Ok(predictions)
}

/// Predicted sales attributed to a single hour of a day whose total
/// predicted sales is `predicted_sales`.
pub fn hourly_sales(predicted_sales: f64, hour: u32) -> f64 {
    predicted_sales * intraday_profile(hour)
}
