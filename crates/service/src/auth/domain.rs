use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Ensure this field has between 1 and 150 characters."),
        custom(function = "validate_username_chars")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Ensure this field has at least 8 characters."))]
    pub password: String,
}

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c)) {
        return Ok(());
    }
    Err(ValidationError::new("invalid_username")
        .with_message("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".into()))
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated principal attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
    pub expires_at: i64,
}
