use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::{DatabaseConfig, PoolConfig};

/// Open the pooled connection described by `config`.
///
/// # Errors
///
/// Returns an error if the credentials do not form a valid URL or the initial
/// connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let url = config
        .connection_url()
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "Connecting to database..."
    );
    connect_url(url, &config.pool).await
}

/// Open a pool for an explicit connection URL.
///
/// `size` connections are kept warm and up to `size + max_overflow` may be
/// open at once. Callers block for at most `acquire_timeout` when the pool is
/// exhausted.
///
/// # Errors
///
/// Returns an error if the initial connection cannot be established.
pub async fn connect_url(
    url: impl Into<String>,
    pool: &PoolConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url);
    options
        .min_connections(pool.size)
        .max_connections(pool.max_connections().max(1))
        .max_lifetime(pool.recycle)
        .acquire_timeout(pool.acquire_timeout)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    tracing::info!(
        pool_size = pool.size,
        max_overflow = pool.max_overflow,
        recycle_secs = pool.recycle.as_secs(),
        "Database connection established"
    );
    Ok(db)
}

/// Close every pooled connection. Called once on shutdown.
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => tracing::info!("Database pool closed"),
        Err(e) => tracing::warn!(error = %e, "Failed to close database pool cleanly"),
    }
}
