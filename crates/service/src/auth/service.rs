use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::Duration;
use rand::rngs::OsRng;
use tracing::{info, debug, warn, instrument};
use validator::Validate;

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::hours(token_ttl_hours), password_algorithm: "argon2".into() }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("secret", 12));
    /// let input = RegisterInput { username: "alice".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        input.validate().map_err(|e| AuthError::Validation(e.into()))?;
        if let Some(existing) = self.repo.find_user_by_username(&input.username).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        // a concurrent registration can still win; the repository reports it as Conflict
        let user = self
            .repo
            .create_user_with_password(&input.username, hash, self.cfg.password_algorithm.clone())
            .await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig::new("secret", 12));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "u");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!(user_id = %user.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let (token, expires_at) = token::issue(&user, &self.cfg.jwt_secret, self.cfg.token_ttl)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token, expires_at })
    }

    /// Resolve a bearer token to the user it was issued for.
    pub fn authenticate(&self, bearer: &str) -> Result<AuthUser, AuthError> {
        token::verify(bearer, &self.cfg.jwt_secret)?.user()
    }
}
