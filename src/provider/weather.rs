use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Deserialize;

use crate::config::WeatherConfig;

use super::error::ProviderError;

/// One day of weather features feeding the sales forecaster.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub rain: f64,
    pub snowfall: f64,
    pub weather_code: i32,
    pub temperature: f64,
}

struct CacheEntry {
    rows: Vec<WeatherDay>,
    expires_at: Instant,
}

/// Caching, retrying HTTP client for the calendar/weather provider (C1).
///
/// A successful fetch for a given (start, end) is cached for
/// `config.cache_ttl_secs`; a failed fetch is never cached. Transient
/// failures are retried with exponential backoff up to
/// `config.retry.max_retries` attempts.
pub struct WeatherProvider {
    client: reqwest::Client,
    config: WeatherConfig,
    cache: DashMap<(NaiveDate, NaiveDate), CacheEntry>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    #[serde(default)]
    rain_sum: Vec<f64>,
    #[serde(default)]
    snowfall_sum: Vec<f64>,
    #[serde(default)]
    weather_code: Vec<i32>,
    #[serde(default)]
    temperature_2m_mean: Vec<f64>,
}

impl WeatherProvider {
    pub fn new(client: reqwest::Client, config: WeatherConfig) -> Self {
        Self {
            client,
            config,
            cache: DashMap::new(),
        }
    }

    /// Per-day weather for every date in `[start, end]`, inclusive.
    ///
    /// Returns an empty sequence (not an error) if the upstream source
    /// responds with no data — callers are expected to detect and
    /// surface "weather unavailable" themselves.
    #[tracing::instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn weather_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherDay>, ProviderError> {
        if start > end {
            return Err(ProviderError::InvalidRange(start, end));
        }

        if let Some(entry) = self.cache.get(&(start, end))
            && entry.expires_at > Instant::now()
        {
            return Ok(entry.rows.clone());
        }

        let rows = self.fetch_with_retry(start, end).await?;

        self.cache.insert(
            (start, end),
            CacheEntry {
                rows: rows.clone(),
                expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
            },
        );

        Ok(rows)
    }

    async fn fetch_with_retry(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherDay>, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(start, end).await {
                Ok(rows) => return Ok(rows),
                Err(err) if attempt < self.config.retry.max_retries && is_retryable(&err) => {
                    let delay = self.config.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "weather fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherDay>, ProviderError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("latitude", self.config.latitude.to_string()),
                ("longitude", self.config.longitude.to_string()),
                (
                    "daily",
                    "rain_sum,snowfall_sum,weather_code,temperature_2m_mean".to_string(),
                ),
                ("timezone", self.config.timezone.clone()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<OpenMeteoResponse>().await?;

        let Some(daily) = body.daily else {
            return Ok(Vec::new());
        };

        if daily.time.is_empty() {
            return Ok(Vec::new());
        }

        let rows = daily
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, date_str)| {
                let date: NaiveDate = date_str.parse().ok()?;
                Some(WeatherDay {
                    date,
                    rain: daily.rain_sum.get(i).copied().unwrap_or(0.0),
                    snowfall: daily.snowfall_sum.get(i).copied().unwrap_or(0.0),
                    weather_code: daily.weather_code.get(i).copied().unwrap_or(0),
                    temperature: daily.temperature_2m_mean.get(i).copied().unwrap_or(0.0),
                })
            })
            .collect();

        Ok(rows)
    }
}

fn is_retryable(err: &ProviderError) -> bool {
    match err {
        ProviderError::Request(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ProviderError::Empty | ProviderError::InvalidRange(_, _) => false,
    }
}
