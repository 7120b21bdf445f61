//! Create `snippet` table with FK to its owning `user`.
//!
//! `highlighted` holds the rendered HTML document and is rewritten on every save.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Snippet::Table)
                    .if_not_exists()
                    .col(uuid(Snippet::Id).primary_key())
                    .col(uuid(Snippet::OwnerId).not_null())
                    .col(string_len(Snippet::Title, 100).not_null().default(""))
                    .col(text(Snippet::Code).not_null())
                    .col(boolean(Snippet::Linenos).not_null().default(false))
                    .col(string_len(Snippet::Language, 100).not_null())
                    .col(string_len(Snippet::Style, 100).not_null())
                    .col(text(Snippet::Highlighted).not_null())
                    .col(timestamp_with_time_zone(Snippet::Created).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_snippet_owner")
                            .from(Snippet::Table, Snippet::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Snippet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Snippet { Table, Id, OwnerId, Title, Code, Linenos, Language, Style, Highlighted, Created }

#[derive(DeriveIden)]
enum User { Table, Id }
