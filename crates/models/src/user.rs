use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::snippet;

pub const USERNAME_MAX_LEN: usize = 150;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Snippets,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Snippets => Entity::has_many(snippet::Entity).into() }
    }
}

impl Related<snippet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Snippets.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Letters, digits and `@.+-_`, 1 to 150 characters.
pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.is_empty() {
        return Err(errors::ModelError::Validation("username required".into()));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("username longer than {USERNAME_MAX_LEN} characters")));
    }
    if !username.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c)) {
        return Err(errors::ModelError::Validation("username may contain only letters, digits and @/./+/-/_".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, username: &str) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

/// All users in registration order.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
