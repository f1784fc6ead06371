use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PricingResult;
use crate::models::{
    CreateMarkupRule, CreateProduct, MarkupRule, PriceQuote, Product, ProductFilter, RuleFilter,
    RuleScope, UpdateMarkupRule, UpdateProduct,
};
use crate::repository::{MarkupRuleRepository, ProductRepository};
use crate::service::PricingService;

const RULES_TAG: &str = "markup-rules";
const PRODUCTS_TAG: &str = "products";

/// OpenAPI documentation for the pricing API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_rules,
        create_rule,
        get_rule,
        update_rule,
        delete_rule,
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        price_product,
    ),
    components(
        schemas(
            MarkupRule,
            CreateMarkupRule,
            UpdateMarkupRule,
            RuleFilter,
            RuleScope,
            Product,
            CreateProduct,
            UpdateProduct,
            ProductFilter,
            PriceQuote
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = RULES_TAG, description = "Markup rule management"),
        (name = PRODUCTS_TAG, description = "Product catalog and price resolution")
    )
)]
pub struct ApiDoc;

/// Create the pricing router with markup-rule and product endpoints
pub fn router<R, P>(service: PricingService<R, P>) -> Router
where
    R: MarkupRuleRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/markup-rules", get(list_rules).post(create_rule))
        .route(
            "/markup-rules/{id}",
            get(get_rule).put(update_rule).delete(delete_rule),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/price", get(price_product))
        .with_state(shared_service)
}

/// List markup rules
#[utoipa::path(
    get,
    path = "/markup-rules",
    tag = RULES_TAG,
    params(RuleFilter),
    responses(
        (status = 200, description = "List of markup rules", body = Vec<MarkupRule>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_rules<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    Query(filter): Query<RuleFilter>,
) -> PricingResult<Json<Vec<MarkupRule>>> {
    let rules = service.list_rules(filter).await?;
    Ok(Json(rules))
}

/// Create a markup rule
#[utoipa::path(
    post,
    path = "/markup-rules",
    tag = RULES_TAG,
    request_body = CreateMarkupRule,
    responses(
        (status = 201, description = "Markup rule created", body = MarkupRule),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_rule<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    ValidatedJson(input): ValidatedJson<CreateMarkupRule>,
) -> PricingResult<impl IntoResponse> {
    let rule = service.create_rule(input).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// Get a markup rule by ID
#[utoipa::path(
    get,
    path = "/markup-rules/{id}",
    tag = RULES_TAG,
    params(
        ("id" = Uuid, Path, description = "Markup rule ID")
    ),
    responses(
        (status = 200, description = "Markup rule found", body = MarkupRule),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_rule<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
) -> PricingResult<Json<MarkupRule>> {
    let rule = service.get_rule(id).await?;
    Ok(Json(rule))
}

/// Update a markup rule
#[utoipa::path(
    put,
    path = "/markup-rules/{id}",
    tag = RULES_TAG,
    params(
        ("id" = Uuid, Path, description = "Markup rule ID")
    ),
    request_body = UpdateMarkupRule,
    responses(
        (status = 200, description = "Markup rule updated", body = MarkupRule),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_rule<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateMarkupRule>,
) -> PricingResult<Json<MarkupRule>> {
    let rule = service.update_rule(id, input).await?;
    Ok(Json(rule))
}

/// Delete a markup rule
#[utoipa::path(
    delete,
    path = "/markup-rules/{id}",
    tag = RULES_TAG,
    params(
        ("id" = Uuid, Path, description = "Markup rule ID")
    ),
    responses(
        (status = 204, description = "Markup rule deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_rule<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
) -> PricingResult<impl IntoResponse> {
    service.delete_rule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List products
#[utoipa::path(
    get,
    path = "/products",
    tag = PRODUCTS_TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    Query(filter): Query<ProductFilter>,
) -> PricingResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = PRODUCTS_TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> PricingResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
) -> PricingResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> PricingResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
) -> PricingResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the current price of a product
#[utoipa::path(
    get,
    path = "/products/{id}/price",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Resolved price quote", body = PriceQuote),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn price_product<R: MarkupRuleRepository, P: ProductRepository>(
    State(service): State<Arc<PricingService<R, P>>>,
    UuidPath(id): UuidPath,
) -> PricingResult<Json<PriceQuote>> {
    let quote = service.price_product(id).await?;
    Ok(Json(quote))
}
