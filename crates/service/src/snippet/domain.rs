use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Writable snippet fields as supplied by a client.
///
/// Read-only keys (`id`, `owner`, `created`, `highlighted`, ...) are not
/// declared and are dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SnippetInput {
    #[serde(default)]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub code: String,
    #[serde(default)]
    pub linenos: bool,
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("This field may not be blank.".into()));
    }
    Ok(())
}

/// A stored snippet together with its owner's username.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub highlighted: String,
    pub created: DateTime<FixedOffset>,
}

impl Snippet {
    pub fn from_model(m: models::snippet::Model, owner: String) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            owner,
            title: m.title,
            code: m.code,
            linenos: m.linenos,
            language: m.language,
            style: m.style,
            highlighted: m.highlighted,
            created: m.created,
        }
    }
}
