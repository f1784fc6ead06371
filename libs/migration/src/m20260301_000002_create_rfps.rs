use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(RfpStatusEnum::Enum)
                    .values([
                        RfpStatusEnum::Draft,
                        RfpStatusEnum::Submitted,
                        RfpStatusEnum::Won,
                        RfpStatusEnum::Lost,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rfps::Table)
                    .if_not_exists()
                    .col(pk_uuid(Rfps::Id))
                    .col(string_len(Rfps::Title, 255).not_null())
                    .col(string_len(Rfps::Customer, 255).not_null())
                    .col(
                        ColumnDef::new(Rfps::Status)
                            .enumeration(
                                RfpStatusEnum::Enum,
                                [
                                    RfpStatusEnum::Draft,
                                    RfpStatusEnum::Submitted,
                                    RfpStatusEnum::Won,
                                    RfpStatusEnum::Lost,
                                ],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    // Equipment payload plus the last computed totals snapshot
                    .col(json_binary(Rfps::Requirements).not_null().default("{}"))
                    .col(
                        timestamp_with_time_zone(Rfps::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Rfps::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rfps_status")
                    .table(Rfps::Table)
                    .col(Rfps::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rfps::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RfpStatusEnum::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Rfps {
    Table,
    Id,
    Title,
    Customer,
    Status,
    Requirements,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RfpStatusEnum {
    #[sea_orm(iden = "rfp_status")]
    Enum,
    Draft,
    Submitted,
    Won,
    Lost,
}
