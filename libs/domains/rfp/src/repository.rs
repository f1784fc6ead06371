use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RfpResult;
use crate::models::{CreateRfp, EquipmentLineItem, EquipmentTotals, Rfp, RfpFilter, UpdateRfp};

/// Repository trait for RFP persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RfpRepository: Send + Sync {
    /// Create a new RFP (draft, empty equipment)
    async fn create(&self, input: CreateRfp) -> RfpResult<Rfp>;

    /// Get an RFP by ID
    async fn get_by_id(&self, id: Uuid) -> RfpResult<Option<Rfp>>;

    /// List RFPs with optional filters
    async fn list(&self, filter: RfpFilter) -> RfpResult<Vec<Rfp>>;

    /// Update title/customer/status
    async fn update(&self, id: Uuid, input: UpdateRfp) -> RfpResult<Rfp>;

    /// Delete an RFP by ID
    async fn delete(&self, id: Uuid) -> RfpResult<bool>;

    /// Replace the equipment list and totals snapshot atomically
    async fn set_equipment(
        &self,
        id: Uuid,
        equipment: Vec<EquipmentLineItem>,
        totals: EquipmentTotals,
    ) -> RfpResult<Rfp>;
}
