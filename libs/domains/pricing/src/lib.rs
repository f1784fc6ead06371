//! Pricing Domain
//!
//! Markup rules, the product catalog and price resolution.
//!
//! A product's B2B and retail price is computed from its cost and the
//! highest-priority active markup rule matching its brand, manufacturer
//! or category (falling back to global rules), clamped per channel and
//! overridden by any manual price on the product. The arithmetic lives
//! in the pure [`resolver`] module; persistence goes through the
//! repository traits in [`repository`] with Postgres implementations in
//! [`postgres`].

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod resolver;
pub mod service;

// Re-export commonly used types
pub use error::{PricingError, PricingResult};
pub use models::{
    CreateMarkupRule, CreateProduct, MarkupRule, PriceQuote, Product, ProductFilter, RuleFilter,
    RuleScope, UpdateMarkupRule, UpdateProduct,
};
pub use postgres::{PgMarkupRuleRepository, PgProductRepository};
pub use repository::{MarkupRuleRepository, ProductRepository};
pub use service::PricingService;
