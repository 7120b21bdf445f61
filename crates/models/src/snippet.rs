use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const TITLE_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "snippet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    #[sea_orm(column_type = "Text")]
    pub highlighted: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Owner }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable columns of a snippet; `highlighted` is rendered by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct SnippetFields {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub highlighted: String,
}

pub fn validate_fields(fields: &SnippetFields) -> Result<(), errors::ModelError> {
    if fields.title.chars().count() > TITLE_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("title longer than {TITLE_MAX_LEN} characters")));
    }
    if fields.code.trim().is_empty() {
        return Err(errors::ModelError::Validation("code required".into()));
    }
    if fields.language.is_empty() || fields.style.is_empty() {
        return Err(errors::ModelError::Validation("language and style required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, owner_id: Uuid, fields: SnippetFields) -> Result<Model, errors::ModelError> {
    validate_fields(&fields)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        title: Set(fields.title),
        code: Set(fields.code),
        linenos: Set(fields.linenos),
        language: Set(fields.language),
        style: Set(fields.style),
        highlighted: Set(fields.highlighted),
        created: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every writable column; owner and `created` are kept. `None` when the row is gone.
pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, fields: SnippetFields) -> Result<Option<Model>, errors::ModelError> {
    validate_fields(&fields)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.title = Set(fields.title);
    am.code = Set(fields.code);
    am.linenos = Set(fields.linenos);
    am.language = Set(fields.language);
    am.style = Set(fields.style);
    am.highlighted = Set(fields.highlighted);
    Ok(Some(am.update(db).await?))
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Snippets owned by any of `owner_ids`, oldest first.
pub async fn list_for_owners<C: ConnectionTrait>(db: &C, owner_ids: &[Uuid]) -> Result<Vec<Model>, errors::ModelError> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::OwnerId.is_in(owner_ids.iter().copied()))
        .order_by_asc(Column::Created)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
