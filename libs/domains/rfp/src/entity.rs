use crate::models::{RfpRequirements, RfpStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the rfps table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rfps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub customer: String,
    pub status: RfpStatus,
    pub requirements: Json, // JSONB: {equipment, totals}
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Rfp {
    fn from(model: Model) -> Self {
        // Tolerate older/partial payloads: missing keys default to empty
        let requirements: RfpRequirements =
            serde_json::from_value(model.requirements.clone()).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            customer: model.customer,
            status: model.status,
            equipment: requirements.equipment,
            totals: requirements.totals,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::CreateRfp> for ActiveModel {
    fn from(input: crate::models::CreateRfp) -> Self {
        let now = chrono::Utc::now();
        let requirements = serde_json::to_value(RfpRequirements::default())
            .unwrap_or_else(|_| serde_json::json!({}));

        ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(input.title),
            customer: Set(input.customer),
            status: Set(RfpStatus::Draft),
            requirements: Set(requirements),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
