use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at start-up and shared by every request
/// handler. At least one connection is opened here so a bad connection
/// string fails at start-up rather than on the first request.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let pool = pool_options(settings).connect(&settings.url).await?;
    Ok(pool)
}

/// Builds the pool without opening any connection.
///
/// Connections are established on first use, so an unreachable database
/// only surfaces as an error from the query that needed it.
pub fn connect_lazy(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let pool = pool_options(settings).connect_lazy(&settings.url)?;
    Ok(pool)
}

/// Applies the bundled migrations.
///
/// Every statement is `IF NOT EXISTS`, so this is safe to run against a
/// database whose schema was created by other tooling.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
