use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::ApiError;
use crate::extract::BaseUrl;
use crate::routes::snippets::parse_id;
use crate::serializers::{ListQuery, PageResponse, UserResponse};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/users/", tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "All users, or a page envelope when `page` is given", body = [UserResponse]),
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
            let page = state.users.page(p?).await?;
            let body = PageResponse::new(page, &base.users(), q.page_size.is_some(), |u| UserResponse::new(u, &base))?;
            Ok(Json(body).into_response())
        }
        None => {
            let users = state.users.list().await?;
            let body: Vec<UserResponse> = users.into_iter().map(|u| UserResponse::new(u, &base)).collect();
            Ok(Json(body).into_response())
        }
    }
}

#[utoipa::path(
    get, path = "/users/{id}/", tag = "users",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn retrieve(
    State(state): State<ServerState>,
    base: BaseUrl,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get(parse_id(&id)?).await?;
    Ok(Json(UserResponse::new(user, &base)))
}
