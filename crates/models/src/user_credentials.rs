use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_for_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserId.eq(user_id)).one(db).await?)
}

/// Store a password hash for `user_id`, replacing any previous one.
pub async fn upsert_password<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, ModelError> {
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    match find_for_user(db, user_id).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.password_hash = Set(password_hash);
            am.password_algorithm = Set(algorithm.to_string());
            am.updated_at = Set(now);
            Ok(am.update(db).await?)
        }
        None => {
            let am = ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                password_hash: Set(password_hash),
                password_algorithm: Set(algorithm.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            Ok(am.insert(db).await?)
        }
    }
}
