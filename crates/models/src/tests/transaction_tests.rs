use crate::{snippet, user};
use sea_orm::{EntityTrait, TransactionTrait};
use anyhow::Result;

use super::{fields, setup_test_db};

#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let owner = user::create(&txn, "ivan").await?;
    let s = snippet::create(&txn, owner.id, fields("in txn", "x = 1")).await?;
    txn.commit().await?;

    assert!(snippet::Entity::find_by_id(s.id).one(&db).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let owner = user::create(&txn, "judy").await?;
    let s = snippet::create(&txn, owner.id, fields("rolled back", "x = 1")).await?;
    txn.rollback().await?;

    assert!(user::Entity::find_by_id(owner.id).one(&db).await?.is_none());
    assert!(snippet::Entity::find_by_id(s.id).one(&db).await?.is_none());
    Ok(())
}
