use serde::Serialize;
use uuid::Uuid;

/// Read-only view of a user and the snippets they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub snippets: Vec<Uuid>,
}
