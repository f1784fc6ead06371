//! API routes module

pub mod health;

use axum::Router;
use domain_documents::{DocumentService, HttpCdnStore, JsonRenderer, PgFileRepository};
use domain_pricing::{PgMarkupRuleRepository, PgProductRepository, PricingService};
use domain_rfp::{PgRfpRepository, RfpService};
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let pricing = PricingService::new(
        PgMarkupRuleRepository::new(state.db.clone()),
        PgProductRepository::new(state.db.clone()),
    );

    let rfps = RfpService::new(PgRfpRepository::new(state.db.clone()));

    let documents = DocumentService::new(
        PgFileRepository::new(state.db.clone()),
        HttpCdnStore::new(state.config.cdn.clone()),
        Arc::new(JsonRenderer),
    );

    let v1 = Router::new()
        .merge(domain_pricing::handlers::router(pricing))
        .nest("/rfps", domain_rfp::handlers::router(rfps))
        .nest("/documents", domain_documents::handlers::router(documents));

    Router::new()
        .nest("/v1", v1)
        .merge(health::router(state.clone()))
}
