use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{RfpError, RfpResult},
    models::{
        CreateRfp, EquipmentLineItem, EquipmentTotals, Rfp, RfpFilter, RfpRequirements, UpdateRfp,
    },
    repository::RfpRepository,
};

pub struct PgRfpRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgRfpRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl RfpRepository for PgRfpRepository {
    async fn create(&self, input: CreateRfp) -> RfpResult<Rfp> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(rfp_id = %model.id, "Created RFP");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RfpResult<Option<Rfp>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: RfpFilter) -> RfpResult<Vec<Rfp>> {
        let mut query = entity::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        query = query
            .order_by_desc(entity::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateRfp) -> RfpResult<Rfp> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?
            .ok_or(RfpError::NotFound(id))?;

        let mut rfp: Rfp = model.into();
        rfp.apply_update(input);

        let requirements = serde_json::to_value(RfpRequirements {
            equipment: rfp.equipment.clone(),
            totals: rfp.totals.clone(),
        })
        .map_err(|e| RfpError::Internal(format!("Serialization error: {}", e)))?;

        let active_model = entity::ActiveModel {
            id: Set(rfp.id),
            title: Set(rfp.title.clone()),
            customer: Set(rfp.customer.clone()),
            status: Set(rfp.status),
            requirements: Set(requirements),
            created_at: Set(rfp.created_at.into()),
            updated_at: Set(rfp.updated_at.into()),
        };

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(rfp_id = %id, "Updated RFP");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> RfpResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(rfp_id = %id, "Deleted RFP");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_equipment(
        &self,
        id: Uuid,
        equipment: Vec<EquipmentLineItem>,
        totals: EquipmentTotals,
    ) -> RfpResult<Rfp> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?
            .ok_or(RfpError::NotFound(id))?;

        let requirements = serde_json::to_value(RfpRequirements { equipment, totals })
            .map_err(|e| RfpError::Internal(format!("Serialization error: {}", e)))?;

        let active_model = entity::ActiveModel {
            id: Set(model.id),
            title: Set(model.title),
            customer: Set(model.customer),
            status: Set(model.status),
            requirements: Set(requirements),
            created_at: Set(model.created_at),
            updated_at: Set(chrono::Utc::now().into()),
        };

        let updated = self
            .base
            .update(active_model)
            .await
            .map_err(|e| RfpError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(rfp_id = %id, "Replaced RFP equipment");
        Ok(updated.into())
    }
}
