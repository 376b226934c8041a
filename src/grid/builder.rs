use std::collections::HashMap;

use chrono::NaiveDate;

use crate::db::DbPool;
use crate::forecasting::{self, SalesModel};
use crate::models::{
    DailyPrediction, HourSlot, FIRST_HOUR, LAST_HOUR, OVERFLOW_LEVEL, OVERFLOW_NAME,
    OVERFLOW_STAFF_ID, OVERFLOW_STATUS,
};
use crate::provider::{festivals_in_range, WeatherProvider};

use super::error::GridError;

/// Build the decision grid for `[start, end]`, inclusive, fetching
/// missing predictions on demand.
///
/// Mirrors the fixed pipeline: fetch → left-join staff → join
/// predictions → explode 9..24 inclusive → append overflow → compute
/// pred_sales_per_hour and salary → sort by (date, hour, staff_id).
pub async fn build(
    start: NaiveDate,
    end: NaiveDate,
    db: &DbPool,
    provider: &WeatherProvider,
    model: &SalesModel,
) -> Result<Vec<HourSlot>, GridError> {
    if start > end {
        return Err(GridError::InvalidRange);
    }

    let preferences = db.preferences.list_in_range(start, end).await?;
    let staff = db.staff.list().await?;
    let predictions = ensure_predictions(start, end, db, provider, model).await?;

    let staff_by_id: HashMap<i64, _> = staff.into_iter().map(|s| (s.id, s)).collect();
    let predictions_by_date: HashMap<NaiveDate, f64> = predictions
        .iter()
        .map(|p| (p.date, p.predicted_sales))
        .collect();

    let mut rows = Vec::new();

    for preference in &preferences {
        let predicted_sales = predictions_by_date.get(&preference.date).copied().unwrap_or(0.0);
        let (name, level, status) = match staff_by_id.get(&preference.staff_id) {
            Some(s) => (s.name.clone(), s.level, s.status.as_str().to_string()),
            None => ("unknown".to_string(), 0, "unknown".to_string()),
        };

        for hour in FIRST_HOUR..=LAST_HOUR {
            rows.push(HourSlot::new(
                preference.date,
                hour,
                preference.staff_id,
                name.clone(),
                level,
                status.clone(),
                predicted_sales,
            ));
        }
    }

    let mut date = start;
    while date <= end {
        let predicted_sales = predictions_by_date.get(&date).copied().unwrap_or(0.0);
        for hour in FIRST_HOUR..=LAST_HOUR {
            rows.push(HourSlot::new(
                date,
                hour,
                OVERFLOW_STAFF_ID,
                OVERFLOW_NAME.to_string(),
                OVERFLOW_LEVEL,
                OVERFLOW_STATUS.to_string(),
                predicted_sales,
            ));
        }
        date = date.succ_opt().expect("scheduling ranges stay well within chrono's range");
    }

    rows.sort_by_key(|r| r.sort_key());
    Ok(rows)
}

/// Fetch persisted predictions for `[start, end]` and forecast any
/// missing dates on demand, persisting the new rows before returning.
async fn ensure_predictions(
    start: NaiveDate,
    end: NaiveDate,
    db: &DbPool,
    provider: &WeatherProvider,
    model: &SalesModel,
) -> Result<Vec<DailyPrediction>, GridError> {
    let mut existing = db.predictions.get_range(start, end).await?;
    let covered: std::collections::HashSet<NaiveDate> = existing.iter().map(|p| p.date).collect();

    let missing: Vec<NaiveDate> = {
        let mut dates = Vec::new();
        let mut date = start;
        while date <= end {
            if !covered.contains(&date) {
                dates.push(date);
            }
            date = date.succ_opt().expect("scheduling ranges stay well within chrono's range");
        }
        dates
    };

    if missing.is_empty() {
        return Ok(existing);
    }

    let missing_start = *missing.first().expect("checked non-empty above");
    let missing_end = *missing.last().expect("checked non-empty above");

    let festival_flags: HashMap<NaiveDate, bool> = festivals_in_range(missing_start, missing_end)
        .into_iter()
        .collect();
    let weather = provider.weather_in_range(missing_start, missing_end).await?;

    let forecasted = forecasting::predict_daily_sales(
        missing_start,
        missing_end,
        &festival_flags,
        &weather,
        model,
    )?;
    let forecasted: Vec<DailyPrediction> = forecasted
        .into_iter()
        .filter(|p| covered.iter().all(|d| *d != p.date))
        .collect();

    db.predictions.upsert_many(forecasted.clone()).await?;
    existing.extend(forecasted);
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryConfig, WeatherConfig};
    use crate::models::{NewShiftPreference, NewStaff};
    use sqlx::SqlitePool;

    async fn memory_db() -> DbPool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE staff (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                level INTEGER NOT NULL,
                status TEXT NOT NULL,
                e_mail TEXT NOT NULL UNIQUE,
                gender TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE shift_pre (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                staff_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                morning INTEGER NOT NULL DEFAULT 0,
                afternoon INTEGER NOT NULL DEFAULT 0,
                night INTEGER NOT NULL DEFAULT 0,
                UNIQUE(staff_id, date)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE daily_prediction (
                date TEXT PRIMARY KEY,
                predicted_sales REAL NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE shift_ass (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                hour INTEGER NOT NULL,
                staff_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                level INTEGER NOT NULL,
                status TEXT NOT NULL,
                salary INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        DbPool::from_pool(pool)
    }

    fn test_model() -> SalesModel {
        SalesModel::from_json(
            r#"{"coefficients": {}, "intercept": 80000.0, "season_codes": {"winter":0.0,"spring":1.0,"summer":2.0,"autumn":3.0}}"#,
        )
        .unwrap()
    }

    fn test_provider() -> WeatherProvider {
        WeatherProvider::new(
            reqwest::Client::new(),
            WeatherConfig {
                base_url: "http://127.0.0.1:1/unused".to_string(),
                latitude: 0.0,
                longitude: 0.0,
                timezone: "UTC".to_string(),
                cache_ttl_secs: 3600,
                retry: RetryConfig {
                    max_retries: 0,
                    initial_delay_ms: 1,
                    max_delay_ms: 1,
                    backoff_multiplier: 1.0,
                },
            },
        )
    }

    #[tokio::test]
    async fn staff_without_preference_contributes_no_rows() {
        let db = memory_db().await;
        db.staff
            .create(NewStaff {
                name: "Alice".into(),
                age: 25,
                level: 3,
                status: "full_time".into(),
                e_mail: "alice@example.com".into(),
                gender: "f".into(),
            })
            .await
            .unwrap();
        db.predictions
            .upsert_many(vec![DailyPrediction {
                date: "2026-02-01".parse().unwrap(),
                predicted_sales: 100_000.0,
            }])
            .await
            .unwrap();

        let date: NaiveDate = "2026-02-01".parse().unwrap();
        let rows = build(date, date, &db, &test_provider(), &test_model())
            .await
            .unwrap();

        // Only the overflow worker's 16 rows, since Alice has no preference.
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|r| r.staff_id == OVERFLOW_STAFF_ID));
    }

    #[tokio::test]
    async fn eligible_staff_gets_exactly_sixteen_rows_plus_overflow() {
        let db = memory_db().await;
        let staff = db
            .staff
            .create(NewStaff {
                name: "Bob".into(),
                age: 30,
                level: 4,
                status: "full_time".into(),
                e_mail: "bob@example.com".into(),
                gender: "m".into(),
            })
            .await
            .unwrap();
        let date: NaiveDate = "2026-02-01".parse().unwrap();
        db.preferences
            .upsert(NewShiftPreference {
                staff_id: staff.id,
                date,
                morning: true,
                afternoon: true,
                night: true,
            })
            .await
            .unwrap();
        db.predictions
            .upsert_many(vec![DailyPrediction {
                date,
                predicted_sales: 100_000.0,
            }])
            .await
            .unwrap();

        let rows = build(date, date, &db, &test_provider(), &test_model())
            .await
            .unwrap();

        assert_eq!(rows.len(), 32);
        let bob_rows = rows.iter().filter(|r| r.staff_id == staff.id).count();
        assert_eq!(bob_rows, 16);
    }

    #[tokio::test]
    async fn grid_is_sorted_by_date_hour_staff_id() {
        let db = memory_db().await;
        let date: NaiveDate = "2026-02-01".parse().unwrap();
        db.predictions
            .upsert_many(vec![DailyPrediction {
                date,
                predicted_sales: 50_000.0,
            }])
            .await
            .unwrap();

        let rows = build(date, date, &db, &test_provider(), &test_model())
            .await
            .unwrap();

        let mut sorted = rows.clone();
        sorted.sort_by_key(|r| r.sort_key());
        assert_eq!(rows, sorted);
    }

    #[tokio::test]
    async fn rejects_inverted_range() {
        let db = memory_db().await;
        let start: NaiveDate = "2026-02-05".parse().unwrap();
        let end: NaiveDate = "2026-02-01".parse().unwrap();
        let err = build(start, end, &db, &test_provider(), &test_model())
            .await
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidRange));
    }
}
