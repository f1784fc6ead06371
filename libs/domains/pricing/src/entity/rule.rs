use crate::models::RuleScope;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the markup_rules table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "markup_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub scope: RuleScope,
    pub target_id: Option<Uuid>,
    pub priority: i32,
    #[sea_orm(column_type = "Decimal(Some((8, 3)))")]
    pub b2b_markup_percent: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 3)))")]
    pub retail_markup_percent: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub min_b2b_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub max_b2b_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub min_retail_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub max_retail_price: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::MarkupRule {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            scope: model.scope,
            target_id: model.target_id,
            priority: model.priority,
            b2b_markup_percent: model.b2b_markup_percent,
            retail_markup_percent: model.retail_markup_percent,
            min_b2b_price: model.min_b2b_price,
            max_b2b_price: model.max_b2b_price,
            min_retail_price: model.min_retail_price,
            max_retail_price: model.max_retail_price,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::CreateMarkupRule> for ActiveModel {
    fn from(input: crate::models::CreateMarkupRule) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            scope: Set(input.scope),
            target_id: Set(input.target_id),
            priority: Set(input.priority),
            b2b_markup_percent: Set(input.b2b_markup_percent),
            retail_markup_percent: Set(input.retail_markup_percent),
            min_b2b_price: Set(input.min_b2b_price),
            max_b2b_price: Set(input.max_b2b_price),
            min_retail_price: Set(input.min_retail_price),
            max_retail_price: Set(input.max_retail_price),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

impl From<crate::models::MarkupRule> for ActiveModel {
    fn from(rule: crate::models::MarkupRule) -> Self {
        ActiveModel {
            id: Set(rule.id),
            name: Set(rule.name),
            scope: Set(rule.scope),
            target_id: Set(rule.target_id),
            priority: Set(rule.priority),
            b2b_markup_percent: Set(rule.b2b_markup_percent),
            retail_markup_percent: Set(rule.retail_markup_percent),
            min_b2b_price: Set(rule.min_b2b_price),
            max_b2b_price: Set(rule.max_b2b_price),
            min_retail_price: Set(rule.min_retail_price),
            max_retail_price: Set(rule.max_retail_price),
            is_active: Set(rule.is_active),
            created_at: Set(rule.created_at.into()),
            updated_at: Set(rule.updated_at.into()),
        }
    }
}
