use async_trait::async_trait;
use models::snippet::{self, SnippetFields};
use models::user;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

use super::domain::Snippet;

#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Every snippet, oldest first.
    async fn list(&self) -> Result<Vec<Snippet>, ServiceError>;
    async fn page(&self, pagination: Pagination) -> Result<Page<Snippet>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Snippet>, ServiceError>;
    async fn create(&self, owner_id: Uuid, fields: SnippetFields) -> Result<Snippet, ServiceError>;
    /// `None` when the snippet no longer exists.
    async fn update(&self, id: Uuid, fields: SnippetFields) -> Result<Option<Snippet>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmSnippetRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSnippetRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn ordered() -> sea_orm::SelectTwo<snippet::Entity, user::Entity> {
        snippet::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(snippet::Column::Created)
            .order_by_asc(snippet::Column::Id)
    }
}

fn to_view((row, owner): (snippet::Model, Option<user::Model>)) -> Snippet {
    let owner = owner.map(|u| u.username).unwrap_or_default();
    Snippet::from_model(row, owner)
}

#[async_trait]
impl SnippetRepository for SeaOrmSnippetRepository {
    async fn list(&self) -> Result<Vec<Snippet>, ServiceError> {
        let rows = Self::ordered().all(&self.db).await?;
        Ok(rows.into_iter().map(to_view).collect())
    }

    async fn page(&self, pagination: Pagination) -> Result<Page<Snippet>, ServiceError> {
        let (idx, per_page) = pagination.normalize();
        let paginator = Self::ordered().paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(idx).await?;
        Ok(Page::new(rows.into_iter().map(to_view).collect(), total, pagination))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Snippet>, ServiceError> {
        let row = snippet::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(to_view))
    }

    async fn create(&self, owner_id: Uuid, fields: SnippetFields) -> Result<Snippet, ServiceError> {
        let created = snippet::create(&self.db, owner_id, fields).await?;
        self.get(created.id).await?.ok_or_else(|| ServiceError::not_found("snippet"))
    }

    async fn update(&self, id: Uuid, fields: SnippetFields) -> Result<Option<Snippet>, ServiceError> {
        match snippet::update(&self.db, id, fields).await? {
            Some(_) => self.get(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(snippet::delete(&self.db, id).await?)
    }
}

/// In-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSnippetRepository {
        owners: Mutex<HashMap<Uuid, String>>,
        rows: Mutex<Vec<Snippet>>,
    }

    impl MockSnippetRepository {
        /// Owners must be registered before they can create snippets.
        pub fn add_owner(&self, id: Uuid, username: &str) {
            self.owners.lock().expect("owners lock").insert(id, username.to_string());
        }
    }

    #[async_trait]
    impl SnippetRepository for MockSnippetRepository {
        async fn list(&self) -> Result<Vec<Snippet>, ServiceError> {
            Ok(self.rows.lock().expect("rows lock").clone())
        }

        async fn page(&self, pagination: Pagination) -> Result<Page<Snippet>, ServiceError> {
            Ok(Page::from_vec(self.list().await?, pagination))
        }

        async fn get(&self, id: Uuid) -> Result<Option<Snippet>, ServiceError> {
            Ok(self.rows.lock().expect("rows lock").iter().find(|s| s.id == id).cloned())
        }

        async fn create(&self, owner_id: Uuid, fields: SnippetFields) -> Result<Snippet, ServiceError> {
            snippet::validate_fields(&fields)?;
            let owner = self
                .owners
                .lock()
                .expect("owners lock")
                .get(&owner_id)
                .cloned()
                .ok_or_else(|| ServiceError::Db(format!("owner {owner_id} does not exist")))?;
            let s = Snippet {
                id: Uuid::new_v4(),
                owner_id,
                owner,
                title: fields.title,
                code: fields.code,
                linenos: fields.linenos,
                language: fields.language,
                style: fields.style,
                highlighted: fields.highlighted,
                created: chrono::Utc::now().fixed_offset(),
            };
            self.rows.lock().expect("rows lock").push(s.clone());
            Ok(s)
        }

        async fn update(&self, id: Uuid, fields: SnippetFields) -> Result<Option<Snippet>, ServiceError> {
            snippet::validate_fields(&fields)?;
            let mut rows = self.rows.lock().expect("rows lock");
            let Some(s) = rows.iter_mut().find(|s| s.id == id) else {
                return Ok(None);
            };
            s.title = fields.title;
            s.code = fields.code;
            s.linenos = fields.linenos;
            s.language = fields.language;
            s.style = fields.style;
            s.highlighted = fields.highlighted;
            Ok(Some(s.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().expect("rows lock");
            let before = rows.len();
            rows.retain(|s| s.id != id);
            Ok(rows.len() < before)
        }
    }
}
