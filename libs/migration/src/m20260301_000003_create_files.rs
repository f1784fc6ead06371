use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(pk_uuid(Files::Id))
                    .col(string_len(Files::EntityType, 32).not_null())
                    .col(uuid(Files::EntityId).not_null())
                    // Encodes the version: "<base>_v<N>.<ext>"
                    .col(string_len(Files::Filename, 255).not_null())
                    .col(text(Files::Url).not_null())
                    .col(string_len(Files::ContentType, 128).not_null())
                    .col(
                        timestamp_with_time_zone(Files::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Version listing always scopes to one entity, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_files_entity")
                    .table(Files::Table)
                    .col(Files::EntityType)
                    .col(Files::EntityId)
                    .col(Files::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    EntityType,
    EntityId,
    Filename,
    Url,
    ContentType,
    CreatedAt,
}
