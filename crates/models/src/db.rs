use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

/// Connect with explicit pool configuration.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "database connected"
    );
    Ok(db)
}

/// Round-trip a trivial query to make sure the pool hands out live connections.
pub async fn test_connection(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    db.query_one(Statement::from_string(backend, "SELECT 1".to_string()))
        .await?
        .ok_or_else(|| anyhow::anyhow!("SELECT 1 returned no rows"))?;
    Ok(())
}
