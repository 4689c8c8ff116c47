use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use std::time::Duration;

use crate::db::connection_string::DatabaseUrl;

/// Builds the pool without opening a connection, so the server can start
/// while the database is unreachable. Connection errors surface on first use.
pub fn create_pool(
    database_url: &DatabaseUrl,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url.connect_str())?;

    info!(
        host = database_url.host(),
        port = database_url.port(),
        topology = %database_url.topology(),
        "Database pool configured."
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied.");
    Ok(())
}

/// Applies migrations at startup; a failure is logged and the server keeps
/// running so that non-database endpoints stay available.
pub async fn init_database(pool: &PgPool) {
    if let Err(e) = run_migrations(pool).await {
        warn!(
            "Failed to initialize database: {}. Database-backed endpoints will fail until it is reachable.",
            e
        );
    }
}
