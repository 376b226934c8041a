use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::db::error::DbResult;
use crate::db::repos::AssignmentRepo;
use crate::models::Assignment;

pub struct SqliteAssignmentRepo {
    pool: SqlitePool,
}

impl SqliteAssignmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_assignment(row: &sqlx::sqlite::SqliteRow) -> DbResult<Assignment> {
    let date_str: String = row.try_get("date")?;
    Ok(Assignment {
        date: date_str.parse().map_err(|_| {
            crate::db::error::DbError::Validation(format!("invalid date '{date_str}'"))
        })?,
        hour: row.try_get::<i64, _>("hour")? as u32,
        staff_id: row.try_get("staff_id")?,
        name: row.try_get("name")?,
        level: row.try_get("level")?,
        status: row.try_get("status")?,
        salary: row.try_get("salary")?,
    })
}

#[async_trait]
impl AssignmentRepo for SqliteAssignmentRepo {
    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Assignment>> {
        let rows = sqlx::query(
            "SELECT date, hour, staff_id, name, level, status, salary FROM shift_ass
             WHERE date >= ? AND date <= ? ORDER BY date, hour, staff_id",
        )
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_assignment).collect()
    }

    async fn replace_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        assignments: Vec<Assignment>,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shift_ass WHERE date >= ? AND date <= ?")
            .bind(start.to_string())
            .bind(end.to_string())
            .execute(&mut *tx)
            .await?;

        for assignment in assignments {
            sqlx::query(
                "INSERT INTO shift_ass (date, hour, staff_id, name, level, status, salary)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(assignment.date.to_string())
            .bind(assignment.hour as i64)
            .bind(assignment.staff_id)
            .bind(&assignment.name)
            .bind(assignment.level)
            .bind(&assignment.status)
            .bind(assignment.salary)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE shift_ass (
                id INTEGER PRIMARY KEY,
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
        pool
    }

    fn sample_assignment(date: NaiveDate, hour: u32, staff_id: i64) -> Assignment {
        Assignment {
            date,
            hour,
            staff_id,
            name: "Aiko Tanaka".to_string(),
            level: 3,
            status: "part_time".to_string(),
            salary: 1250,
        }
    }

    #[tokio::test]
    async fn replace_then_list_round_trips() {
        let repo = SqliteAssignmentRepo::new(test_pool().await);
        let date: NaiveDate = "2026-01-05".parse().unwrap();
        let rows = vec![sample_assignment(date, 9, 1001), sample_assignment(date, 10, 1001)];

        repo.replace_in_range(date, date, rows.clone()).await.unwrap();
        let listed = repo.list_in_range(date, date).await.unwrap();

        assert_eq!(listed, rows);
    }

    #[tokio::test]
    async fn replace_is_atomic_delete_then_insert() {
        let repo = SqliteAssignmentRepo::new(test_pool().await);
        let date: NaiveDate = "2026-01-05".parse().unwrap();

        repo.replace_in_range(date, date, vec![sample_assignment(date, 9, 1001)])
            .await
            .unwrap();
        repo.replace_in_range(date, date, vec![sample_assignment(date, 9, 1002)])
            .await
            .unwrap();

        let listed = repo.list_in_range(date, date).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].staff_id, 1002);
    }
}
