/// Errors surfaced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

/// Map a raw sqlx error to `Conflict` when it represents a uniqueness
/// violation, otherwise pass it through unchanged.
pub fn map_write_error(err: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return DbError::Conflict(db_err.message().to_string());
    }
    DbError::Sqlx(err)
}
