//! HS256 access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// username
    pub sub: String,
    /// user id
    pub uid: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user(&self) -> Result<AuthUser, AuthError> {
        let id = Uuid::parse_str(&self.uid).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(AuthUser { id, username: self.sub.clone() })
    }
}

/// Returns the token and its expiry (unix seconds).
pub fn issue(user: &AuthUser, secret: &str, ttl: Duration) -> Result<(String, i64), AuthError> {
    let now = Utc::now();
    let exp = (now + ttl).timestamp();
    let claims = Claims { sub: user.username.clone(), uid: user.id.to_string(), iat: now.timestamp(), exp };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok((token, exp))
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser { id: Uuid::new_v4(), username: "alice".into() }
    }

    #[test]
    fn issued_token_verifies() {
        let u = user();
        let (token, exp) = issue(&u, "secret", Duration::hours(1)).unwrap();
        let claims = verify(&token, "secret").unwrap();
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.user().unwrap(), u);
    }

    #[test]
    fn wrong_secret_rejected() {
        let (token, _) = issue(&user(), "secret", Duration::hours(1)).unwrap();
        assert!(matches!(verify(&token, "other"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_rejected() {
        // Past the default 60s leeway
        let (token, _) = issue(&user(), "secret", Duration::minutes(-5)).unwrap();
        assert!(matches!(verify(&token, "secret"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn garbage_rejected() {
        assert!(verify("not.a.jwt", "secret").is_err());
    }
}
