use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub manual_b2b_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub manual_retail_price: Option<Decimal>,
    pub brand_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            sku: model.sku,
            name: model.name,
            cost: model.cost,
            manual_b2b_price: model.manual_b2b_price,
            manual_retail_price: model.manual_retail_price,
            brand_id: model.brand_id,
            manufacturer_id: model.manufacturer_id,
            category_id: model.category_id,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(Uuid::now_v7()),
            sku: Set(input.sku),
            name: Set(input.name),
            cost: Set(input.cost),
            manual_b2b_price: Set(input.manual_b2b_price),
            manual_retail_price: Set(input.manual_retail_price),
            brand_id: Set(input.brand_id),
            manufacturer_id: Set(input.manufacturer_id),
            category_id: Set(input.category_id),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

impl From<crate::models::Product> for ActiveModel {
    fn from(product: crate::models::Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            sku: Set(product.sku),
            name: Set(product.name),
            cost: Set(product.cost),
            manual_b2b_price: Set(product.manual_b2b_price),
            manual_retail_price: Set(product.manual_retail_price),
            brand_id: Set(product.brand_id),
            manufacturer_id: Set(product.manufacturer_id),
            category_id: Set(product.category_id),
            is_active: Set(product.is_active),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}
