use thiserror::Error;

/// SQLSTATE PostgreSQL reports when an insert violates a unique index.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// True when the database rejected a write because of a unique index.
    ///
    /// This is the backstop for two requests racing past the same
    /// duplicate pre-check.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::QueryError(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            }
            _ => false,
        }
    }
}
