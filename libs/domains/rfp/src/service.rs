use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RfpError, RfpResult};
use crate::models::{
    CreateRfp, EquipmentLineItem, EquipmentTotals, Rfp, RfpFilter, SetEquipment, UpdateRfp,
};
use crate::repository::RfpRepository;
use crate::totals;

/// Service layer for RFP business logic
pub struct RfpService<R: RfpRepository> {
    repository: Arc<R>,
}

impl<R: RfpRepository> Clone for RfpService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: RfpRepository> RfpService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new draft RFP
    pub async fn create_rfp(&self, input: CreateRfp) -> RfpResult<Rfp> {
        input
            .validate()
            .map_err(|e| RfpError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get an RFP by ID
    pub async fn get_rfp(&self, id: Uuid) -> RfpResult<Rfp> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(RfpError::NotFound(id))
    }

    /// List RFPs with filters
    pub async fn list_rfps(&self, filter: RfpFilter) -> RfpResult<Vec<Rfp>> {
        self.repository.list(filter).await
    }

    /// Update an RFP's title/customer/status
    pub async fn update_rfp(&self, id: Uuid, input: UpdateRfp) -> RfpResult<Rfp> {
        input
            .validate()
            .map_err(|e| RfpError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete an RFP
    pub async fn delete_rfp(&self, id: Uuid) -> RfpResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(RfpError::NotFound(id));
        }

        Ok(())
    }

    /// Replace the equipment list: validates the items, recomputes the
    /// totals, persists `{equipment, totals}` and returns the totals.
    pub async fn set_equipment(
        &self,
        id: Uuid,
        input: SetEquipment,
    ) -> RfpResult<EquipmentTotals> {
        input
            .validate()
            .map_err(|e| RfpError::Validation(e.to_string()))?;

        for item in &input.equipment {
            if item.unit_price.is_sign_negative() {
                return Err(RfpError::Validation(
                    "unit_price must not be negative".to_string(),
                ));
            }
            if item.margin_percent.is_sign_negative() {
                return Err(RfpError::Validation(
                    "margin_percent must not be negative".to_string(),
                ));
            }
        }

        let computed = totals::compute_totals(&input.equipment);

        let rfp = self
            .repository
            .set_equipment(id, input.equipment, computed)
            .await?;

        tracing::info!(
            rfp_id = %id,
            grand_total = %rfp.totals.grand_total,
            "Recomputed RFP totals"
        );

        Ok(rfp.totals)
    }

    /// Current equipment list of an RFP
    pub async fn get_equipment(&self, id: Uuid) -> RfpResult<Vec<EquipmentLineItem>> {
        Ok(self.get_rfp(id).await?.equipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItemKind;
    use crate::repository::MockRfpRepository;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(kind: LineItemKind, quantity: u32, unit_price: &str, margin: &str) -> EquipmentLineItem {
        EquipmentLineItem {
            kind,
            description: "line".to_string(),
            quantity,
            unit_price: dec(unit_price),
            margin_percent: dec(margin),
        }
    }

    fn stored_rfp(id: Uuid, equipment: Vec<EquipmentLineItem>, totals: EquipmentTotals) -> Rfp {
        let now = Utc::now();
        Rfp {
            id,
            title: "Campus retrofit".to_string(),
            customer: "Acme Corp".to_string(),
            status: Default::default(),
            equipment,
            totals,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_set_equipment_computes_and_persists_totals() {
        let rfp_id = Uuid::now_v7();
        let mut repo = MockRfpRepository::new();
        repo.expect_set_equipment()
            .withf(move |id, _, totals| *id == rfp_id && totals.grand_total == dec("210.00"))
            .returning(|id, equipment, totals| Ok(stored_rfp(id, equipment, totals)));

        let service = RfpService::new(repo);

        let totals = service
            .set_equipment(
                rfp_id,
                SetEquipment {
                    equipment: vec![
                        line(LineItemKind::Product, 1, "100", "10"),
                        line(LineItemKind::Service, 1, "100", "0"),
                    ],
                },
            )
            .await
            .unwrap();

        assert_eq!(totals.products_total, dec("110.00"));
        assert_eq!(totals.services_total, dec("100.00"));
        assert_eq!(totals.grand_total, dec("210.00"));
    }

    #[tokio::test]
    async fn test_set_equipment_rejects_negative_unit_price() {
        let service = RfpService::new(MockRfpRepository::new());

        let result = service
            .set_equipment(
                Uuid::now_v7(),
                SetEquipment {
                    equipment: vec![line(LineItemKind::Product, 1, "-5", "0")],
                },
            )
            .await;

        assert!(matches!(result, Err(RfpError::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_equipment_rejects_zero_quantity() {
        let service = RfpService::new(MockRfpRepository::new());

        let result = service
            .set_equipment(
                Uuid::now_v7(),
                SetEquipment {
                    equipment: vec![line(LineItemKind::Product, 0, "10", "0")],
                },
            )
            .await;

        assert!(matches!(result, Err(RfpError::Validation(_))));
    }

    #[tokio::test]
    async fn test_set_equipment_unknown_rfp_propagates_not_found() {
        let mut repo = MockRfpRepository::new();
        repo.expect_set_equipment()
            .returning(|id, _, _| Err(RfpError::NotFound(id)));

        let service = RfpService::new(repo);

        let result = service
            .set_equipment(
                Uuid::now_v7(),
                SetEquipment {
                    equipment: vec![line(LineItemKind::Service, 1, "50", "0")],
                },
            )
            .await;

        assert!(matches!(result, Err(RfpError::NotFound(_))));
    }
}
