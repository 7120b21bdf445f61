/// Database connection and configuration tests
pub mod db_tests;


/// Transaction handling tests
pub mod transaction_tests;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Fresh SQLite file per test, migrated with the real migrator.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let path = std::env::temp_dir().join(format!("snippets-models-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn fields(title: &str, code: &str) -> crate::snippet::SnippetFields {
    crate::snippet::SnippetFields {
        title: title.to_string(),
        code: code.to_string(),
        linenos: false,
        language: "python".to_string(),
        style: "InspiredGitHub".to_string(),
        highlighted: format!("<pre>{code}</pre>"),
    }
}
