use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::db::error::DbResult;
use crate::db::repos::DailyPredictionRepo;
use crate::models::DailyPrediction;

pub struct SqliteDailyPredictionRepo {
    pool: SqlitePool,
}

impl SqliteDailyPredictionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_prediction(row: &sqlx::sqlite::SqliteRow) -> DbResult<DailyPrediction> {
    let date_str: String = row.try_get("date")?;
    Ok(DailyPrediction {
        date: date_str.parse().map_err(|_| {
            crate::db::error::DbError::Validation(format!("invalid date '{date_str}'"))
        })?,
        predicted_sales: row.try_get("predicted_sales")?,
    })
}

#[async_trait]
impl DailyPredictionRepo for SqliteDailyPredictionRepo {
    async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<DailyPrediction>> {
        let rows = sqlx::query(
            "SELECT date, predicted_sales FROM daily_prediction WHERE date >= ? AND date <= ? ORDER BY date",
        )
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_prediction).collect()
    }

    async fn upsert_many(&self, predictions: Vec<DailyPrediction>) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        for prediction in predictions {
            sqlx::query(
                "INSERT INTO daily_prediction (date, predicted_sales) VALUES (?, ?)
                 ON CONFLICT(date) DO UPDATE SET predicted_sales = excluded.predicted_sales",
            )
            .bind(prediction.date.to_string())
            .bind(prediction.predicted_sales)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
