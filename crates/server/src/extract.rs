//! Request extractors: the authenticated user, the absolute base URL and
//! JSON bodies with per-field type errors.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::{AUTHORIZATION, HOST};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;
use service::auth::domain::AuthUser;
use service::errors::FieldErrors;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Token from `Authorization: Bearer <token>`, falling back to the auth cookie.
/// Other authorization schemes count as no credentials.
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    header.or_else(|| {
        CookieJar::from_headers(headers)
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Rejects with 401 unless the request carries a valid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers).ok_or(ApiError::NotAuthenticated)?;
        let user = state.auth.authenticate(&token)?;
        Ok(CurrentUser(user))
    }
}

/// `scheme://host` of the incoming request, used to build hyperlinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("http");
        let host = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or("localhost");
        BaseUrl(format!("{scheme}://{host}"))
    }

    pub fn snippets(&self) -> String { format!("{}/snippets/", self.0) }

    pub fn snippet(&self, id: impl std::fmt::Display) -> String { format!("{}/snippets/{id}/", self.0) }

    pub fn snippet_highlight(&self, id: impl std::fmt::Display) -> String {
        format!("{}/snippets/{id}/highlight/", self.0)
    }

    pub fn users(&self) -> String { format!("{}/users/", self.0) }

    pub fn user(&self, id: impl std::fmt::Display) -> String { format!("{}/users/{id}/", self.0) }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BaseUrl::from_headers(&parts.headers))
    }
}

/// Field that collects errors not tied to a single key, e.g. a non-object body.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// JSON body. Syntax errors and a missing content type stay `{"detail"}`
/// rejections; a value of the wrong type is reported against its field.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// Convert a parsed JSON document into `T`, naming the top-level field that failed.
pub fn decode_fields<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let field = match e.path().iter().next() {
            Some(Segment::Map { key }) => key.clone(),
            _ => NON_FIELD_ERRORS.to_string(),
        };
        ApiError::Validation(FieldErrors::single(&field, e.inner().to_string()))
    })
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state).await?;
        decode_fields(value).map(JsonBody)
    }
}
