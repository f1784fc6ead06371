use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// RFP lifecycle status
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rfp_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RfpStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "won")]
    Won,
    #[sea_orm(string_value = "lost")]
    Lost,
}

/// Kind of an equipment line item
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
    ToSchema,
    TS,
    Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineItemKind {
    Product,
    Service,
}

/// One line of an RFP's equipment list
///
/// Ephemeral: stored inside the RFP's JSON `requirements` payload, not
/// as its own table. `margin_percent` is a whole-number percent
/// (10 = 10%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct EquipmentLineItem {
    pub kind: LineItemKind,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[ts(as = "String")]
    pub unit_price: Decimal,
    #[ts(as = "String")]
    pub margin_percent: Decimal,
}

/// Aggregated totals over an equipment list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct EquipmentTotals {
    /// Sum of quantity * unit_price over product lines
    #[ts(as = "String")]
    pub products_subtotal: Decimal,
    /// Margin added on top of the products subtotal
    #[ts(as = "String")]
    pub products_margin: Decimal,
    #[ts(as = "String")]
    pub products_total: Decimal,
    #[ts(as = "String")]
    pub services_subtotal: Decimal,
    #[ts(as = "String")]
    pub services_margin: Decimal,
    #[ts(as = "String")]
    pub services_total: Decimal,
    /// products_total + services_total
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

/// JSON shape of the rfps.requirements column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfpRequirements {
    #[serde(default)]
    pub equipment: Vec<EquipmentLineItem>,
    #[serde(default)]
    pub totals: EquipmentTotals,
}

/// Request for proposal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Rfp {
    pub id: Uuid,
    pub title: String,
    pub customer: String,
    pub status: RfpStatus,
    pub equipment: Vec<EquipmentLineItem>,
    /// Snapshot of the last computed totals
    pub totals: EquipmentTotals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an RFP
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct CreateRfp {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub customer: String,
}

/// DTO for updating an RFP
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct UpdateRfp {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub customer: Option<String>,
    pub status: Option<RfpStatus>,
}

/// Query filters for listing RFPs
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, TS)]
#[ts(export)]
pub struct RfpFilter {
    pub status: Option<RfpStatus>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// Equipment replacement payload for PUT /rfps/{id}/equipment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct SetEquipment {
    #[validate(nested)]
    pub equipment: Vec<EquipmentLineItem>,
}

fn default_limit() -> usize {
    50
}

impl Default for RfpFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Rfp {
    /// Apply updates from UpdateRfp DTO
    pub fn apply_update(&mut self, update: UpdateRfp) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(customer) = update.customer {
            self.customer = customer;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
