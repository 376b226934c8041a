use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::db::error::{DbResult, map_write_error};
use crate::db::repos::ShiftPreferenceRepo;
use crate::models::{NewShiftPreference, ShiftPreference};

pub struct SqliteShiftPreferenceRepo {
    pool: SqlitePool,
}

impl SqliteShiftPreferenceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_preference(row: &sqlx::sqlite::SqliteRow) -> DbResult<ShiftPreference> {
    let date_str: String = row.try_get("date")?;
    Ok(ShiftPreference {
        staff_id: row.try_get("staff_id")?,
        date: date_str.parse().map_err(|_| {
            crate::db::error::DbError::Validation(format!("invalid date '{date_str}'"))
        })?,
        morning: row.try_get::<i64, _>("morning")? != 0,
        afternoon: row.try_get::<i64, _>("afternoon")? != 0,
        night: row.try_get::<i64, _>("night")? != 0,
    })
}

#[async_trait]
impl ShiftPreferenceRepo for SqliteShiftPreferenceRepo {
    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<ShiftPreference>> {
        let rows = sqlx::query(
            "SELECT staff_id, date, morning, afternoon, night FROM shift_pre
             WHERE date >= ? AND date <= ? ORDER BY date, staff_id",
        )
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_preference).collect()
    }

    async fn upsert(&self, preference: NewShiftPreference) -> DbResult<ShiftPreference> {
        sqlx::query(
            "INSERT INTO shift_pre (staff_id, date, morning, afternoon, night) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(staff_id, date) DO UPDATE SET
                morning = excluded.morning,
                afternoon = excluded.afternoon,
                night = excluded.night",
        )
        .bind(preference.staff_id)
        .bind(preference.date.to_string())
        .bind(preference.morning as i64)
        .bind(preference.afternoon as i64)
        .bind(preference.night as i64)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(ShiftPreference {
            staff_id: preference.staff_id,
            date: preference.date,
            morning: preference.morning,
            afternoon: preference.afternoon,
            night: preference.night,
        })
    }
}
