#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::AuthUser;

// Each test gets its own SQLite file so tests never share rows
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("snippets-service-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> AuthUser {
    let u = models::user::create(db, username).await.expect("seed user");
    AuthUser { id: u.id, username: u.username }
}
