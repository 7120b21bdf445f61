use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use service::snippet::SnippetInput;
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{BaseUrl, CurrentUser, JsonBody};
use crate::serializers::{ListQuery, PageResponse, SnippetResponse};
use crate::state::ServerState;

/// Unparseable ids cannot name a row, so they are reported as missing.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

#[utoipa::path(
    get, path = "/snippets/", tag = "snippets",
    params(ListQuery),
    responses(
        (status = 200, description = "All snippets, or a page envelope when `page` is given", body = [SnippetResponse]),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    base: BaseUrl,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(q) = query?;
    match q.pagination(state.pagination.default_page_size, state.pagination.max_page_size) {
        Some(p) => {
            let page = state.snippets.page(p?).await?;
            let body = PageResponse::new(page, &base.snippets(), q.page_size.is_some(), |s| SnippetResponse::new(s, &base))?;
            Ok(Json(body).into_response())
        }
        None => {
            let all = state.snippets.list().await?;
            let body: Vec<SnippetResponse> = all.into_iter().map(|s| SnippetResponse::new(s, &base)).collect();
            Ok(Json(body).into_response())
        }
    }
}

#[utoipa::path(
    post, path = "/snippets/", tag = "snippets",
    request_body = crate::openapi::SnippetRequest,
    responses(
        (status = 201, description = "Created", body = SnippetResponse),
        (status = 400, description = "Field errors"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    base: BaseUrl,
    JsonBody(input): JsonBody<SnippetInput>,
) -> Result<(StatusCode, Json<SnippetResponse>), ApiError> {
    let created = state.snippets.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(SnippetResponse::new(created, &base))))
}

#[utoipa::path(
    get, path = "/snippets/{id}/", tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet", body = SnippetResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn retrieve(
    State(state): State<ServerState>,
    base: BaseUrl,
    Path(id): Path<String>,
) -> Result<Json<SnippetResponse>, ApiError> {
    let snippet = state.snippets.get(parse_id(&id)?).await?;
    Ok(Json(SnippetResponse::new(snippet, &base)))
}

#[utoipa::path(
    put, path = "/snippets/{id}/", tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet id")),
    request_body = crate::openapi::SnippetRequest,
    responses(
        (status = 200, description = "Updated", body = SnippetResponse),
        (status = 400, description = "Field errors"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    base: BaseUrl,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<SnippetInput>,
) -> Result<Json<SnippetResponse>, ApiError> {
    let id = parse_id(&id)?;
    let updated = state.snippets.update(&user, id, input).await?;
    Ok(Json(SnippetResponse::new(updated, &base)))
}

#[utoipa::path(
    delete, path = "/snippets/{id}/", tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    ),
    security(("bearer" = []))
)]
pub async fn destroy(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.snippets.delete(&user, id).await?;
    info!(snippet_id = %id, username = %user.username, "snippet_destroyed");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/snippets/{id}/highlight/", tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Highlighted HTML document", body = String, content_type = "text/html"),
        (status = 404, description = "Not found")
    )
)]
pub async fn highlight(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let html = state.snippets.highlighted(parse_id(&id)?).await?;
    Ok(Html(html))
}
