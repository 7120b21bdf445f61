use thiserror::Error;

use crate::errors::FieldErrors;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("username already taken")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}
