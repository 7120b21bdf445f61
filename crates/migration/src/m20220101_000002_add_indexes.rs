use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Snippet: owner lookups when listing users
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_snippet_owner")
                    .table(Snippet::Table)
                    .col(Snippet::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Snippet: default list ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_snippet_created")
                    .table(Snippet::Table)
                    .col(Snippet::Created)
                    .to_owned(),
            )
            .await?;

        // User: list ordering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_created_at")
                    .table(User::Table)
                    .col(User::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_created_at").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_snippet_created").table(Snippet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_snippet_owner").table(Snippet::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Snippet { Table, OwnerId, Created }

#[derive(DeriveIden)]
enum User { Table, CreatedAt }
