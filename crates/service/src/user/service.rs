use std::sync::Arc;

use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

use super::domain::UserProfile;
use super::repository::UserRepository;

/// Read-only access to users; accounts are created through auth.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<UserProfile>, ServiceError> {
        self.repo.list().await
    }

    pub async fn page(&self, pagination: Pagination) -> Result<Page<UserProfile>, ServiceError> {
        self.repo.page(pagination).await
    }

    pub async fn get(&self, id: Uuid) -> Result<UserProfile, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }
}
