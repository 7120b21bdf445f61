//! Object-level permission: anyone may read, only the owner may write.

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

use super::domain::Snippet;

pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

pub fn is_owner(user: &AuthUser, snippet: &Snippet) -> bool {
    user.id == snippet.owner_id
}

pub fn ensure_owner(user: &AuthUser, snippet: &Snippet) -> Result<(), ServiceError> {
    if is_owner(user, snippet) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(PERMISSION_DENIED.to_string()))
    }
}
