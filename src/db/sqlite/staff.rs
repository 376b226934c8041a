use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db::error::{DbError, DbResult, map_write_error};
use crate::db::repos::StaffRepo;
use crate::models::{NewStaff, Staff, StaffPatch, StaffStatus};

pub struct SqliteStaffRepo {
    pool: SqlitePool,
}

impl SqliteStaffRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_staff(row: &sqlx::sqlite::SqliteRow) -> DbResult<Staff> {
    let status_str: String = row.try_get("status")?;
    let status = StaffStatus::parse(&status_str)
        .ok_or_else(|| DbError::Validation(format!("unknown staff status '{status_str}'")))?;
    Ok(Staff {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        level: row.try_get("level")?,
        status,
        e_mail: row.try_get("e_mail")?,
        gender: row.try_get("gender")?,
    })
}

#[async_trait]
impl StaffRepo for SqliteStaffRepo {
    async fn list(&self) -> DbResult<Vec<Staff>> {
        let rows = sqlx::query("SELECT id, name, age, level, status, e_mail, gender FROM staff ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_staff).collect()
    }

    async fn get(&self, id: i64) -> DbResult<Staff> {
        let row = sqlx::query(
            "SELECT id, name, age, level, status, e_mail, gender FROM staff WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;
        row_to_staff(&row)
    }

    async fn create(&self, fields: NewStaff) -> DbResult<Staff> {
        let status = StaffStatus::parse(&fields.status)
            .ok_or_else(|| DbError::Validation(format!("unknown staff status '{}'", fields.status)))?;

        let mut tx = self.pool.begin().await?;

        let next_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id) + 1, 1001) FROM staff")
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO staff (id, name, age, level, status, e_mail, gender) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(next_id)
        .bind(&fields.name)
        .bind(fields.age)
        .bind(fields.level)
        .bind(status.as_str())
        .bind(&fields.e_mail)
        .bind(&fields.gender)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        Ok(Staff {
            id: next_id,
            name: fields.name,
            age: fields.age,
            level: fields.level,
            status,
            e_mail: fields.e_mail,
            gender: fields.gender,
        })
    }

    async fn update(&self, id: i64, patch: StaffPatch) -> DbResult<Staff> {
        let mut current = self.get(id).await?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(age) = patch.age {
            current.age = age;
        }
        if let Some(level) = patch.level {
            current.level = level;
        }
        if let Some(status) = patch.status {
            current.status = StaffStatus::parse(&status)
                .ok_or_else(|| DbError::Validation(format!("unknown staff status '{status}'")))?;
        }
        if let Some(e_mail) = patch.e_mail {
            current.e_mail = e_mail;
        }
        if let Some(gender) = patch.gender {
            current.gender = gender;
        }

        sqlx::query(
            "UPDATE staff SET name = ?, age = ?, level = ?, status = ?, e_mail = ?, gender = ? WHERE id = ?",
        )
        .bind(&current.name)
        .bind(current.age)
        .bind(current.level)
        .bind(current.status.as_str())
        .bind(&current.e_mail)
        .bind(&current.gender)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(current)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        sqlx::query("DELETE FROM shift_pre WHERE staff_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
