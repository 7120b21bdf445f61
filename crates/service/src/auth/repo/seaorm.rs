use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::FieldErrors;
use models::errors::ModelError;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Map a model error, reporting row validation failures against `field`.
fn field_err(field: &'static str) -> impl Fn(ModelError) -> AuthError {
    move |e| match e {
        ModelError::Validation(msg) => AuthError::Validation(FieldErrors::single(field, msg)),
        ModelError::Duplicate(_) => AuthError::Conflict,
        ModelError::Db(msg) => AuthError::Repository(msg),
    }
}

fn repo_err(e: ModelError) -> AuthError {
    AuthError::Repository(e.to_string())
}

fn txn_err(e: DbErr) -> AuthError {
    field_err("username")(ModelError::from(e))
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username).await.map_err(repo_err)?;
        Ok(res.map(|u| AuthUser { id: u.id, username: u.username }))
    }

    async fn create_user_with_password(&self, username: &str, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
        // dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await.map_err(txn_err)?;
        let created = models::user::create(&txn, username).await.map_err(field_err("username"))?;
        models::user_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm)
            .await
            .map_err(field_err("password"))?;
        txn.commit().await.map_err(txn_err)?;
        Ok(AuthUser { id: created.id, username: created.username })
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_for_user(&self.db, user_id).await.map_err(repo_err)?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn duplicate_username_is_conflict_and_leaves_no_orphan() {
        let db = get_db().await.unwrap();
        let repo = SeaOrmAuthRepository::new(db.clone());

        let alice = repo.create_user_with_password("alice", "hash-1".into(), "argon2".into()).await.unwrap();
        let err = repo.create_user_with_password("alice", "hash-2".into(), "argon2".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
        let creds = repo.get_credentials(alice.id).await.unwrap().unwrap();
        assert_eq!(creds.password_hash, "hash-1");

        // credentials failure rolls the user row back
        let err = repo.create_user_with_password("bob", "  ".into(), "argon2".into()).await.unwrap_err();
        match err {
            AuthError::Validation(errs) => assert!(errs.get("password").is_some()),
            other => panic!("unexpected {other:?}"),
        }
        assert!(repo.find_user_by_username("bob").await.unwrap().is_none());
    }
}
