use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::serializers::{ApiRoot, LoginResponse, RegisteredUser, SnippetResponse, UserResponse};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

/// Writable snippet fields; every other key is ignored.
#[derive(ToSchema)]
pub struct SnippetRequest {
    pub title: Option<String>,
    pub code: String,
    pub linenos: Option<bool>,
    /// Syntax name or file extension, default `python`
    pub language: Option<String>,
    /// Theme name, default `InspiredGitHub`
    pub style: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::root::api_root,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::snippets::list,
        crate::routes::snippets::create,
        crate::routes::snippets::retrieve,
        crate::routes::snippets::update,
        crate::routes::snippets::destroy,
        crate::routes::snippets::highlight,
        crate::routes::users::list,
        crate::routes::users::retrieve,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            SnippetRequest,
            SnippetResponse,
            UserResponse,
            RegisteredUser,
            LoginResponse,
            ApiRoot,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "root"),
        (name = "auth"),
        (name = "snippets"),
        (name = "users")
    )
)]
pub struct ApiDoc;
