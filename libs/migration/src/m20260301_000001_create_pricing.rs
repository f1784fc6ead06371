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
                    .as_enum(RuleScopeEnum::Enum)
                    .values([
                        RuleScopeEnum::Brand,
                        RuleScopeEnum::Manufacturer,
                        RuleScopeEnum::Category,
                        RuleScopeEnum::Global,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MarkupRules::Table)
                    .if_not_exists()
                    .col(pk_uuid(MarkupRules::Id))
                    .col(string_len(MarkupRules::Name, 255).not_null())
                    .col(
                        ColumnDef::new(MarkupRules::Scope)
                            .enumeration(
                                RuleScopeEnum::Enum,
                                [
                                    RuleScopeEnum::Brand,
                                    RuleScopeEnum::Manufacturer,
                                    RuleScopeEnum::Category,
                                    RuleScopeEnum::Global,
                                ],
                            )
                            .not_null(),
                    )
                    .col(uuid_null(MarkupRules::TargetId))
                    .col(integer(MarkupRules::Priority).not_null().default(0))
                    .col(decimal_len(MarkupRules::B2bMarkupPercent, 8, 3).not_null())
                    .col(decimal_len(MarkupRules::RetailMarkupPercent, 8, 3).not_null())
                    .col(decimal_len_null(MarkupRules::MinB2bPrice, 12, 2))
                    .col(decimal_len_null(MarkupRules::MaxB2bPrice, 12, 2))
                    .col(decimal_len_null(MarkupRules::MinRetailPrice, 12, 2))
                    .col(decimal_len_null(MarkupRules::MaxRetailPrice, 12, 2))
                    .col(boolean(MarkupRules::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(MarkupRules::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MarkupRules::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Rule matching always filters on activity and orders by priority
        manager
            .create_index(
                Index::create()
                    .name("idx_markup_rules_scope_target")
                    .table(MarkupRules::Table)
                    .col(MarkupRules::Scope)
                    .col(MarkupRules::TargetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_markup_rules_priority")
                    .table(MarkupRules::Table)
                    .col(MarkupRules::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string_len(Products::Sku, 64).not_null())
                    .col(string_len(Products::Name, 255).not_null())
                    .col(decimal_len_null(Products::Cost, 12, 2))
                    .col(decimal_len_null(Products::ManualB2bPrice, 12, 2))
                    .col(decimal_len_null(Products::ManualRetailPrice, 12, 2))
                    .col(uuid_null(Products::BrandId))
                    .col(uuid_null(Products::ManufacturerId))
                    .col(uuid_null(Products::CategoryId))
                    .col(boolean(Products::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_sku")
                    .table(Products::Table)
                    .col(Products::Sku)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MarkupRules::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RuleScopeEnum::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum MarkupRules {
    Table,
    Id,
    Name,
    Scope,
    TargetId,
    Priority,
    B2bMarkupPercent,
    RetailMarkupPercent,
    MinB2bPrice,
    MaxB2bPrice,
    MinRetailPrice,
    MaxRetailPrice,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Sku,
    Name,
    Cost,
    ManualB2bPrice,
    ManualRetailPrice,
    BrandId,
    ManufacturerId,
    CategoryId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RuleScopeEnum {
    #[sea_orm(iden = "rule_scope")]
    Enum,
    Brand,
    Manufacturer,
    Category,
    Global,
}
