//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Siteline API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Siteline API",
        version = "0.1.0",
        description = "Pricing rules, RFP equipment totals and versioned document management",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1", api = domain_pricing::handlers::ApiDoc),
        (path = "/api/v1/rfps", api = domain_rfp::handlers::ApiDoc),
        (path = "/api/v1/documents", api = domain_documents::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
