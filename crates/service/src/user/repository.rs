use std::collections::HashMap;

use async_trait::async_trait;
use models::{snippet, user};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

use super::domain::UserProfile;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user in registration order, each with their snippet ids.
    async fn list(&self) -> Result<Vec<UserProfile>, ServiceError>;
    async fn page(&self, pagination: Pagination) -> Result<Page<UserProfile>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, ServiceError>;
}

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// One query for the snippets of all `users`, grouped back per owner.
    async fn with_snippets(&self, users: Vec<user::Model>) -> Result<Vec<UserProfile>, ServiceError> {
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut by_owner: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for s in snippet::list_for_owners(&self.db, &ids).await? {
            by_owner.entry(s.owner_id).or_default().push(s.id);
        }
        Ok(users
            .into_iter()
            .map(|u| UserProfile {
                snippets: by_owner.remove(&u.id).unwrap_or_default(),
                id: u.id,
                username: u.username,
            })
            .collect())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<UserProfile>, ServiceError> {
        let users = user::list(&self.db).await?;
        self.with_snippets(users).await
    }

    async fn page(&self, pagination: Pagination) -> Result<Page<UserProfile>, ServiceError> {
        let (idx, per_page) = pagination.normalize();
        let paginator = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(idx).await?;
        Ok(Page::new(self.with_snippets(users).await?, total, pagination))
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, ServiceError> {
        let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_snippets(vec![found]).await?.pop())
    }
}

/// In-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<UserProfile>>,
    }

    impl MockUserRepository {
        pub fn insert(&self, profile: UserProfile) {
            self.users.lock().expect("users lock").push(profile);
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn list(&self) -> Result<Vec<UserProfile>, ServiceError> {
            Ok(self.users.lock().expect("users lock").clone())
        }

        async fn page(&self, pagination: Pagination) -> Result<Page<UserProfile>, ServiceError> {
            Ok(Page::from_vec(self.list().await?, pagination))
        }

        async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, ServiceError> {
            Ok(self.users.lock().expect("users lock").iter().find(|u| u.id == id).cloned())
        }
    }
}
