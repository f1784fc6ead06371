use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PricingResult;
use crate::models::{
    CreateMarkupRule, CreateProduct, MarkupRule, Product, ProductFilter, RuleFilter,
    UpdateMarkupRule, UpdateProduct,
};

/// Repository trait for MarkupRule persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkupRuleRepository: Send + Sync {
    /// Create a new markup rule
    async fn create(&self, input: CreateMarkupRule) -> PricingResult<MarkupRule>;

    /// Get a rule by ID
    async fn get_by_id(&self, id: Uuid) -> PricingResult<Option<MarkupRule>>;

    /// List rules with optional filters
    async fn list(&self, filter: RuleFilter) -> PricingResult<Vec<MarkupRule>>;

    /// Update an existing rule
    async fn update(&self, id: Uuid, input: UpdateMarkupRule) -> PricingResult<MarkupRule>;

    /// Delete a rule by ID
    async fn delete(&self, id: Uuid) -> PricingResult<bool>;

    /// Active rules that could apply to the product: global rules plus
    /// rules targeting its brand, manufacturer or category
    async fn find_applicable(&self, product: &Product) -> PricingResult<Vec<MarkupRule>>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> PricingResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> PricingResult<Option<Product>>;

    /// List products with optional filters
    async fn list(&self, filter: ProductFilter) -> PricingResult<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> PricingResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> PricingResult<bool>;

    /// Check if a SKU is already taken, optionally excluding one product
    async fn exists_by_sku(&self, sku: &str, exclude: Option<Uuid>) -> PricingResult<bool>;
}
