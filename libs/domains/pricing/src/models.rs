use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Scope a markup rule applies to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
    Hash,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rule_scope")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleScope {
    #[sea_orm(string_value = "brand")]
    Brand,
    #[sea_orm(string_value = "manufacturer")]
    Manufacturer,
    #[sea_orm(string_value = "category")]
    Category,
    #[default]
    #[sea_orm(string_value = "global")]
    Global,
}

/// Markup rule - drives computed B2B/retail prices
///
/// Non-global rules carry a `target_id` naming the brand, manufacturer
/// or category they apply to. Higher `priority` wins; ties are broken
/// by `created_at` ascending (oldest rule wins).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct MarkupRule {
    /// Unique identifier
    pub id: Uuid,
    /// Display name (e.g. "Pelco cameras 2026")
    pub name: String,
    /// What the rule targets
    pub scope: RuleScope,
    /// Brand/manufacturer/category id; None for global rules
    pub target_id: Option<Uuid>,
    /// Higher wins when several rules match a product
    pub priority: i32,
    /// Whole-number percent (25 = 25%)
    #[ts(as = "String")]
    pub b2b_markup_percent: Decimal,
    #[ts(as = "String")]
    pub retail_markup_percent: Decimal,
    /// Optional price floor/ceiling per channel
    #[ts(as = "Option<String>")]
    pub min_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub min_retail_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_retail_price: Option<Decimal>,
    /// Inactive rules are ignored by the resolver
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a markup rule
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateMarkupRule {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub scope: RuleScope,
    pub target_id: Option<Uuid>,
    #[serde(default)]
    pub priority: i32,
    #[ts(as = "String")]
    pub b2b_markup_percent: Decimal,
    #[ts(as = "String")]
    pub retail_markup_percent: Decimal,
    #[ts(as = "Option<String>")]
    pub min_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub min_retail_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_retail_price: Option<Decimal>,
}

/// DTO for updating a markup rule
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateMarkupRule {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub scope: Option<RuleScope>,
    pub target_id: Option<Uuid>,
    pub priority: Option<i32>,
    #[ts(as = "Option<String>")]
    pub b2b_markup_percent: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub retail_markup_percent: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub min_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub min_retail_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub max_retail_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Query filters for listing markup rules
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, TS)]
#[ts(export)]
pub struct RuleFilter {
    pub scope: Option<RuleScope>,
    pub is_active: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Product {
    pub id: Uuid,
    /// Unique stock keeping unit
    pub sku: String,
    pub name: String,
    /// Dealer cost; prices compute from this
    #[ts(as = "Option<String>")]
    pub cost: Option<Decimal>,
    /// Manual override - always wins over the computed price
    #[ts(as = "Option<String>")]
    pub manual_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub manual_retail_price: Option<Decimal>,
    pub brand_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[ts(as = "Option<String>")]
    pub cost: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub manual_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub manual_retail_price: Option<Decimal>,
    pub brand_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// DTO for updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 64))]
    pub sku: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[ts(as = "Option<String>")]
    pub cost: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub manual_b2b_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub manual_retail_price: Option<Decimal>,
    pub brand_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, TS)]
#[ts(export)]
pub struct ProductFilter {
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// Resolved price for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct PriceQuote {
    #[ts(as = "String")]
    pub b2b_price: Decimal,
    #[ts(as = "String")]
    pub retail_price: Decimal,
    /// Rule that produced the computed price; None when no rule matched
    pub rule_id: Option<Uuid>,
}

fn default_limit() -> usize {
    50
}

impl Default for RuleFilter {
    fn default() -> Self {
        Self {
            scope: None,
            is_active: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            sku: None,
            category_id: None,
            is_active: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl MarkupRule {
    /// Apply updates from UpdateMarkupRule DTO
    pub fn apply_update(&mut self, update: UpdateMarkupRule) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(scope) = update.scope {
            self.scope = scope;
            if scope == RuleScope::Global {
                self.target_id = None;
            }
        }
        if let Some(target_id) = update.target_id {
            self.target_id = Some(target_id);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(pct) = update.b2b_markup_percent {
            self.b2b_markup_percent = pct;
        }
        if let Some(pct) = update.retail_markup_percent {
            self.retail_markup_percent = pct;
        }
        if let Some(min) = update.min_b2b_price {
            self.min_b2b_price = Some(min);
        }
        if let Some(max) = update.max_b2b_price {
            self.max_b2b_price = Some(max);
        }
        if let Some(min) = update.min_retail_price {
            self.min_retail_price = Some(min);
        }
        if let Some(max) = update.max_retail_price {
            self.max_retail_price = Some(max);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

impl Product {
    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(cost) = update.cost {
            self.cost = Some(cost);
        }
        if let Some(price) = update.manual_b2b_price {
            self.manual_b2b_price = Some(price);
        }
        if let Some(price) = update.manual_retail_price {
            self.manual_retail_price = Some(price);
        }
        if let Some(brand_id) = update.brand_id {
            self.brand_id = Some(brand_id);
        }
        if let Some(manufacturer_id) = update.manufacturer_id {
            self.manufacturer_id = Some(manufacturer_id);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}
