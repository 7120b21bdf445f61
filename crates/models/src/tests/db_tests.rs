use crate::db::{connect_with_config, test_connection};
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend};
use anyhow::Result;

use super::setup_test_db;

#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = setup_test_db().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);
    test_connection(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_url_fails_fast() {
    let cfg = DatabaseConfig {
        url: "sqlite:///nonexistent-dir-for-tests/x.db?mode=ro".into(),
        connect_timeout_secs: 1,
        acquire_timeout_secs: 1,
        min_connections: 1,
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    assert!(connect_with_config(&cfg).await.is_err());
}

#[tokio::test]
async fn test_migrations_are_idempotent_and_reversible() -> Result<()> {
    let db = setup_test_db().await?;
    // Already applied by setup; a second run is a no-op
    migration::Migrator::up(&db, None).await?;
    let applied = migration::Migrator::get_applied_migrations(&db).await?;
    assert_eq!(applied.len(), migration::Migrator::migrations().len());

    migration::Migrator::down(&db, None).await?;
    let applied = migration::Migrator::get_applied_migrations(&db).await?;
    assert!(applied.is_empty());
    Ok(())
}
