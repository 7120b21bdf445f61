use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{LoginInput, RegisterInput};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{BaseUrl, JsonBody, AUTH_COOKIE};
use crate::serializers::{LoginResponse, RegisteredUser};
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = RegisteredUser),
        (status = 400, description = "Field errors"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    base: BaseUrl,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<RegisteredUser>), ApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisteredUser::new(user, &base))))
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set as the auth_token cookie", body = LoginResponse),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let session = state.auth.login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        user_id: session.user.id,
        username: session.user.username,
    };
    Ok((jar, Json(out)))
}

#[utoipa::path(
    post, path = "/auth/logout", tag = "auth",
    responses((status = 204, description = "Cookie cleared"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    if jar.get(AUTH_COOKIE).is_some() {
        info!("auth_cookie_cleared");
    }
    let mut removal = Cookie::from(AUTH_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), StatusCode::NO_CONTENT)
}
