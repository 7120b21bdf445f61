use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))?;
    Ok(addr)
}

/// Connect to the configured database and apply pending migrations when enabled.
pub async fn prepare_database(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }
    Ok(db)
}

/// Router wired to SeaORM-backed services.
pub fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> Router {
    routes::build_router(ServerState::new(db, cfg), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }

    let db = prepare_database(&cfg).await?;
    let app = build_app(db, &cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
