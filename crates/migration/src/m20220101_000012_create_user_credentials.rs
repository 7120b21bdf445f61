//! Create `user_credentials`: one argon2 password hash per user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Credentials::Table)
            .if_not_exists()
            .col(uuid(Credentials::Id).primary_key())
            .col(uuid(Credentials::UserId).unique_key())
            .col(string_len(Credentials::PasswordHash, 255))
            .col(string_len(Credentials::PasswordAlgorithm, 64))
            .col(timestamp_with_time_zone(Credentials::CreatedAt))
            .col(timestamp_with_time_zone(Credentials::UpdatedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_credentials_user")
                    .from(Credentials::Table, Credentials::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credentials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Credentials {
    #[sea_orm(iden = "user_credentials")]
    Table,
    Id,
    UserId,
    PasswordHash,
    PasswordAlgorithm,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
