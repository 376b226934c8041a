use chrono::{Datelike, NaiveDate};

use crate::provider::WeatherDay;

/// Season derived from calendar month, matching the frozen encoder
/// shipped with the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn for_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => unreachable!("chrono month is always 1..=12"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

/// One date's feature row, ready to be scored by the regression model.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub weekday_index: u32,
    pub month: u32,
    pub day: u32,
    pub iso_year: i32,
    pub iso_week: u32,
    pub is_festival: bool,
    pub season: Season,
    pub weather_code: i32,
    pub temperature: f64,
    pub rain: f64,
    pub snowfall: f64,
}

impl FeatureRow {
    pub fn build(date: NaiveDate, is_festival: bool, weather: Option<&WeatherDay>) -> Self {
        let iso_week = date.iso_week();
        Self {
            date,
            weekday_index: date.weekday().num_days_from_monday(),
            month: date.month(),
            day: date.day(),
            iso_year: iso_week.year(),
            iso_week: iso_week.week(),
            is_festival,
            season: Season::for_month(date.month()),
            weather_code: weather.map(|w| w.weather_code).unwrap_or(0),
            temperature: weather.map(|w| w.temperature).unwrap_or(0.0),
            rain: weather.map(|w| w.rain).unwrap_or(0.0),
            snowfall: weather.map(|w| w.snowfall).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_boundaries_match_spec() {
        assert_eq!(Season::for_month(12).label(), "winter");
        assert_eq!(Season::for_month(1).label(), "winter");
        assert_eq!(Season::for_month(2).label(), "winter");
        assert_eq!(Season::for_month(3).label(), "spring");
        assert_eq!(Season::for_month(5).label(), "spring");
        assert_eq!(Season::for_month(6).label(), "summer");
        assert_eq!(Season::for_month(8).label(), "summer");
        assert_eq!(Season::for_month(9).label(), "autumn");
        assert_eq!(Season::for_month(11).label(), "autumn");
    }

    #[test]
    fn missing_weather_defaults_to_zero() {
        let date: NaiveDate = "2026-01-05".parse().unwrap();
        let row = FeatureRow::build(date, false, None);
        assert_eq!(row.weather_code, 0);
        assert_eq!(row.temperature, 0.0);
    }
}
