use std::sync::Arc;

use configs::{AppConfig, PaginationConfig};
use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::snippet::repository::SeaOrmSnippetRepository;
use service::snippet::{SnippetDefaults, SnippetService};
use service::user::repository::SeaOrmUserRepository;
use service::user::UserService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub snippets: Arc<SnippetService<SeaOrmSnippetRepository>>,
    pub users: Arc<UserService<SeaOrmUserRepository>>,
    pub pagination: PaginationConfig,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let auth = AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(db.clone())),
            AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours),
        );
        let defaults = SnippetDefaults {
            language: cfg.highlight.default_language.clone(),
            style: cfg.highlight.default_style.clone(),
        };
        let snippets = SnippetService::new(Arc::new(SeaOrmSnippetRepository::new(db.clone())), defaults);
        let users = UserService::new(Arc::new(SeaOrmUserRepository::new(db)));
        Self {
            auth: Arc::new(auth),
            snippets: Arc::new(snippets),
            users: Arc::new(users),
            pagination: cfg.pagination,
        }
    }
}
