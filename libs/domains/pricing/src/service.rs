use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{PricingError, PricingResult};
use crate::models::{
    CreateMarkupRule, CreateProduct, MarkupRule, PriceQuote, Product, ProductFilter, RuleFilter,
    RuleScope, UpdateMarkupRule, UpdateProduct,
};
use crate::repository::{MarkupRuleRepository, ProductRepository};
use crate::resolver;
use rust_decimal::Decimal;

/// Service layer for markup rules, products and price resolution
pub struct PricingService<R: MarkupRuleRepository, P: ProductRepository> {
    rules: Arc<R>,
    products: Arc<P>,
}

impl<R: MarkupRuleRepository, P: ProductRepository> Clone for PricingService<R, P> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            products: Arc::clone(&self.products),
        }
    }
}

/// Non-global rules must name a target; global rules must not.
fn validate_scope_target(scope: RuleScope, target_id: Option<Uuid>) -> PricingResult<()> {
    match (scope, target_id) {
        (RuleScope::Global, Some(_)) => Err(PricingError::Validation(
            "Global rules must not carry a target_id".to_string(),
        )),
        (RuleScope::Global, None) => Ok(()),
        (_, None) => Err(PricingError::Validation(format!(
            "Rules with scope '{}' require a target_id",
            scope
        ))),
        (_, Some(_)) => Ok(()),
    }
}

/// Markup percents, clamp bounds, costs and manual prices must not be
/// negative.
fn ensure_non_negative(label: &str, value: Option<Decimal>) -> PricingResult<()> {
    match value {
        Some(v) if v.is_sign_negative() => Err(PricingError::Validation(format!(
            "{} must not be negative",
            label
        ))),
        _ => Ok(()),
    }
}

impl<R: MarkupRuleRepository, P: ProductRepository> PricingService<R, P> {
    pub fn new(rules: R, products: P) -> Self {
        Self {
            rules: Arc::new(rules),
            products: Arc::new(products),
        }
    }

    /// Create a markup rule after validating the scope/target invariant
    pub async fn create_rule(&self, input: CreateMarkupRule) -> PricingResult<MarkupRule> {
        input
            .validate()
            .map_err(|e| PricingError::Validation(e.to_string()))?;

        validate_scope_target(input.scope, input.target_id)?;

        ensure_non_negative("b2b_markup_percent", Some(input.b2b_markup_percent))?;
        ensure_non_negative("retail_markup_percent", Some(input.retail_markup_percent))?;
        ensure_non_negative("min_b2b_price", input.min_b2b_price)?;
        ensure_non_negative("max_b2b_price", input.max_b2b_price)?;
        ensure_non_negative("min_retail_price", input.min_retail_price)?;
        ensure_non_negative("max_retail_price", input.max_retail_price)?;

        self.rules.create(input).await
    }

    /// Get a rule by ID
    pub async fn get_rule(&self, id: Uuid) -> PricingResult<MarkupRule> {
        self.rules
            .get_by_id(id)
            .await?
            .ok_or(PricingError::RuleNotFound(id))
    }

    /// List rules with filters
    pub async fn list_rules(&self, filter: RuleFilter) -> PricingResult<Vec<MarkupRule>> {
        self.rules.list(filter).await
    }

    /// Update a rule, re-checking the scope/target invariant against the
    /// state the update would produce
    pub async fn update_rule(&self, id: Uuid, input: UpdateMarkupRule) -> PricingResult<MarkupRule> {
        input
            .validate()
            .map_err(|e| PricingError::Validation(e.to_string()))?;

        let existing = self.get_rule(id).await?;

        let effective_scope = input.scope.unwrap_or(existing.scope);
        let mut effective_target = existing.target_id;
        if input.scope == Some(RuleScope::Global) {
            effective_target = None;
        }
        if let Some(target_id) = input.target_id {
            effective_target = Some(target_id);
        }
        validate_scope_target(effective_scope, effective_target)?;

        ensure_non_negative("b2b_markup_percent", input.b2b_markup_percent)?;
        ensure_non_negative("retail_markup_percent", input.retail_markup_percent)?;
        ensure_non_negative("min_b2b_price", input.min_b2b_price)?;
        ensure_non_negative("max_b2b_price", input.max_b2b_price)?;
        ensure_non_negative("min_retail_price", input.min_retail_price)?;
        ensure_non_negative("max_retail_price", input.max_retail_price)?;

        self.rules.update(id, input).await
    }

    /// Delete a rule
    pub async fn delete_rule(&self, id: Uuid) -> PricingResult<()> {
        let deleted = self.rules.delete(id).await?;

        if !deleted {
            return Err(PricingError::RuleNotFound(id));
        }

        Ok(())
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProduct) -> PricingResult<Product> {
        input
            .validate()
            .map_err(|e| PricingError::Validation(e.to_string()))?;

        ensure_non_negative("cost", input.cost)?;
        ensure_non_negative("manual_b2b_price", input.manual_b2b_price)?;
        ensure_non_negative("manual_retail_price", input.manual_retail_price)?;

        self.products.create(input).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> PricingResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(PricingError::ProductNotFound(id))
    }

    /// List products with filters
    pub async fn list_products(&self, filter: ProductFilter) -> PricingResult<Vec<Product>> {
        self.products.list(filter).await
    }

    /// Update a product
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> PricingResult<Product> {
        input
            .validate()
            .map_err(|e| PricingError::Validation(e.to_string()))?;

        ensure_non_negative("cost", input.cost)?;
        ensure_non_negative("manual_b2b_price", input.manual_b2b_price)?;
        ensure_non_negative("manual_retail_price", input.manual_retail_price)?;

        self.products.update(id, input).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: Uuid) -> PricingResult<()> {
        let deleted = self.products.delete(id).await?;

        if !deleted {
            return Err(PricingError::ProductNotFound(id));
        }

        Ok(())
    }

    /// Resolve the current B2B/retail price for a product
    pub async fn price_product(&self, id: Uuid) -> PricingResult<PriceQuote> {
        let product = self.get_product(id).await?;
        let rules = self.rules.find_applicable(&product).await?;

        let quote = resolver::compute_price(&product, &rules);

        tracing::debug!(
            product_id = %id,
            rule_id = ?quote.rule_id,
            b2b = %quote.b2b_price,
            retail = %quote.retail_price,
            "Resolved price"
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockMarkupRuleRepository, MockProductRepository};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn create_rule_input(scope: RuleScope, target_id: Option<Uuid>) -> CreateMarkupRule {
        CreateMarkupRule {
            name: "test-rule".to_string(),
            scope,
            target_id,
            priority: 0,
            b2b_markup_percent: dec("20"),
            retail_markup_percent: dec("35"),
            min_b2b_price: None,
            max_b2b_price: None,
            min_retail_price: None,
            max_retail_price: None,
        }
    }

    fn stored_product(cost: Option<Decimal>, category_id: Option<Uuid>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            sku: "CAM-100".to_string(),
            name: "Dome camera".to_string(),
            cost,
            manual_b2b_price: None,
            manual_retail_price: None,
            brand_id: None,
            manufacturer_id: None,
            category_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_rule(scope: RuleScope, target_id: Option<Uuid>) -> MarkupRule {
        let now = Utc::now();
        MarkupRule {
            id: Uuid::now_v7(),
            name: "stored".to_string(),
            scope,
            target_id,
            priority: 0,
            b2b_markup_percent: dec("20"),
            retail_markup_percent: dec("35"),
            min_b2b_price: None,
            max_b2b_price: None,
            min_retail_price: None,
            max_retail_price: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rule_rejects_scoped_rule_without_target() {
        let service =
            PricingService::new(MockMarkupRuleRepository::new(), MockProductRepository::new());

        let result = service
            .create_rule(create_rule_input(RuleScope::Brand, None))
            .await;

        assert!(matches!(result, Err(PricingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rule_rejects_global_rule_with_target() {
        let service =
            PricingService::new(MockMarkupRuleRepository::new(), MockProductRepository::new());

        let result = service
            .create_rule(create_rule_input(RuleScope::Global, Some(Uuid::now_v7())))
            .await;

        assert!(matches!(result, Err(PricingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rule_accepts_valid_scoped_rule() {
        let mut rules = MockMarkupRuleRepository::new();
        rules.expect_create().returning(|input| {
            let now = Utc::now();
            Ok(MarkupRule {
                id: Uuid::now_v7(),
                name: input.name,
                scope: input.scope,
                target_id: input.target_id,
                priority: input.priority,
                b2b_markup_percent: input.b2b_markup_percent,
                retail_markup_percent: input.retail_markup_percent,
                min_b2b_price: input.min_b2b_price,
                max_b2b_price: input.max_b2b_price,
                min_retail_price: input.min_retail_price,
                max_retail_price: input.max_retail_price,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
        });

        let service = PricingService::new(rules, MockProductRepository::new());
        let target = Uuid::now_v7();

        let rule = service
            .create_rule(create_rule_input(RuleScope::Category, Some(target)))
            .await
            .unwrap();

        assert_eq!(rule.scope, RuleScope::Category);
        assert_eq!(rule.target_id, Some(target));
    }

    #[tokio::test]
    async fn test_update_rule_rejects_scope_change_leaving_no_target() {
        let rule_id = Uuid::now_v7();
        let mut rules = MockMarkupRuleRepository::new();
        rules
            .expect_get_by_id()
            .with(mockall::predicate::eq(rule_id))
            .returning(|_| Ok(Some(stored_rule(RuleScope::Global, None))));

        let service = PricingService::new(rules, MockProductRepository::new());

        let result = service
            .update_rule(
                rule_id,
                UpdateMarkupRule {
                    scope: Some(RuleScope::Brand),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(PricingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_price_product_resolves_through_rules() {
        let category_id = Uuid::now_v7();
        let product = stored_product(Some(dec("100")), Some(category_id));
        let product_id = product.id;

        let mut products = MockProductRepository::new();
        products
            .expect_get_by_id()
            .with(mockall::predicate::eq(product_id))
            .returning(move |_| Ok(Some(product.clone())));

        let mut rules = MockMarkupRuleRepository::new();
        rules.expect_find_applicable().returning(move |_| {
            Ok(vec![stored_rule(RuleScope::Category, Some(category_id))])
        });

        let service = PricingService::new(rules, products);
        let quote = service.price_product(product_id).await.unwrap();

        assert_eq!(quote.b2b_price, dec("120.00"));
        assert_eq!(quote.retail_price, dec("135.00"));
        assert!(quote.rule_id.is_some());
    }

    #[tokio::test]
    async fn test_create_rule_rejects_negative_markup() {
        let service =
            PricingService::new(MockMarkupRuleRepository::new(), MockProductRepository::new());

        let mut input = create_rule_input(RuleScope::Global, None);
        input.b2b_markup_percent = dec("-5");

        let result = service.create_rule(input).await;

        assert!(matches!(result, Err(PricingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_price_product_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_get_by_id().returning(|_| Ok(None));

        let service = PricingService::new(MockMarkupRuleRepository::new(), products);
        let result = service.price_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(PricingError::ProductNotFound(_))));
    }
}
