//! Calendar/weather provider (C1): festival flags and per-day weather
//! features for a date range.

mod error;
mod festivals;
mod weather;

pub use error::ProviderError;
pub use festivals::festivals_in_range;
pub use weather::{WeatherDay, WeatherProvider};
