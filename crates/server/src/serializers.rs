//! Wire representations with absolute hyperlinks.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use service::auth::domain::AuthUser;
use service::pagination::{Page, Pagination};
use service::snippet::Snippet;
use service::user::UserProfile;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::BaseUrl;

#[derive(Debug, Serialize, ToSchema)]
pub struct SnippetResponse {
    pub id: Uuid,
    pub url: String,
    pub highlight: String,
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub created: DateTime<FixedOffset>,
    pub highlighted: String,
}

impl SnippetResponse {
    pub fn new(s: Snippet, base: &BaseUrl) -> Self {
        Self {
            url: base.snippet(s.id),
            highlight: base.snippet_highlight(s.id),
            id: s.id,
            owner: s.owner,
            title: s.title,
            code: s.code,
            linenos: s.linenos,
            language: s.language,
            style: s.style,
            created: s.created,
            highlighted: s.highlighted,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub url: String,
    pub username: String,
    pub snippets: Vec<Uuid>,
}

impl UserResponse {
    pub fn new(u: UserProfile, base: &BaseUrl) -> Self {
        Self { url: base.user(u.id), id: u.id, username: u.username, snippets: u.snippets }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub url: String,
    pub username: String,
}

impl RegisteredUser {
    pub fn new(u: AuthUser, base: &BaseUrl) -> Self {
        Self { url: base.user(u.id), id: u.id, username: u.username }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiRoot {
    pub users: String,
    pub snippets: String,
}

/// `?page=N&page_size=M`; without `page` lists are returned unpaginated.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    /// Requested pagination with the page size clamped to `1..=max`.
    pub fn pagination(&self, default_size: u32, max_size: u32) -> Option<Result<Pagination, ApiError>> {
        let page = self.page?;
        if page == 0 {
            return Some(Err(ApiError::InvalidPage));
        }
        let size = self.page_size.unwrap_or(default_size).clamp(1, max_size.max(1));
        Some(Ok(Pagination::new(page, size)))
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageResponse<T> {
    /// `collection` is the absolute list URL, e.g. `http://host/snippets/`.
    /// Pages past the last one (other than an empty first page) are rejected.
    pub fn new<U>(page: Page<U>, collection: &str, explicit_size: bool, f: impl FnMut(U) -> T) -> Result<Self, ApiError> {
        if page.page as u64 > page.num_pages() {
            return Err(ApiError::InvalidPage);
        }
        let link = |n: u32| {
            if explicit_size {
                format!("{collection}?page={n}&page_size={}", page.per_page)
            } else {
                format!("{collection}?page={n}")
            }
        };
        let next = page.has_next().then(|| link(page.page + 1));
        let previous = page.has_previous().then(|| link(page.page - 1));
        Ok(Self { count: page.total, next, previous, results: page.items.into_iter().map(f).collect() })
    }
}
