use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RfpResult;
use crate::models::{
    CreateRfp, EquipmentLineItem, EquipmentTotals, LineItemKind, Rfp, RfpFilter, RfpStatus,
    SetEquipment, UpdateRfp,
};
use crate::repository::RfpRepository;
use crate::service::RfpService;

const TAG: &str = "rfps";

/// OpenAPI documentation for the RFP API
#[derive(OpenApi)]
#[openapi(
    paths(list_rfps, create_rfp, get_rfp, update_rfp, delete_rfp, set_equipment),
    components(
        schemas(
            Rfp,
            CreateRfp,
            UpdateRfp,
            RfpFilter,
            RfpStatus,
            EquipmentLineItem,
            EquipmentTotals,
            LineItemKind,
            SetEquipment
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "RFP management and equipment totals")
    )
)]
pub struct ApiDoc;

/// Create the RFP router with all HTTP endpoints
pub fn router<R: RfpRepository + 'static>(service: RfpService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_rfps).post(create_rfp))
        .route("/{id}", get(get_rfp).put(update_rfp).delete(delete_rfp))
        .route("/{id}/equipment", put(set_equipment))
        .with_state(shared_service)
}

/// List RFPs with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(RfpFilter),
    responses(
        (status = 200, description = "List of RFPs", body = Vec<Rfp>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_rfps<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    Query(filter): Query<RfpFilter>,
) -> RfpResult<Json<Vec<Rfp>>> {
    let rfps = service.list_rfps(filter).await?;
    Ok(Json(rfps))
}

/// Create a new RFP
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRfp,
    responses(
        (status = 201, description = "RFP created", body = Rfp),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_rfp<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateRfp>,
) -> RfpResult<impl IntoResponse> {
    let rfp = service.create_rfp(input).await?;
    Ok((StatusCode::CREATED, Json(rfp)))
}

/// Get an RFP by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "RFP ID")
    ),
    responses(
        (status = 200, description = "RFP found", body = Rfp),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_rfp<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    UuidPath(id): UuidPath,
) -> RfpResult<Json<Rfp>> {
    let rfp = service.get_rfp(id).await?;
    Ok(Json(rfp))
}

/// Update an RFP
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "RFP ID")
    ),
    request_body = UpdateRfp,
    responses(
        (status = 200, description = "RFP updated", body = Rfp),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_rfp<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRfp>,
) -> RfpResult<Json<Rfp>> {
    let rfp = service.update_rfp(id, input).await?;
    Ok(Json(rfp))
}

/// Delete an RFP
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "RFP ID")
    ),
    responses(
        (status = 204, description = "RFP deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_rfp<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    UuidPath(id): UuidPath,
) -> RfpResult<impl IntoResponse> {
    service.delete_rfp(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the equipment list and recompute totals
#[utoipa::path(
    put,
    path = "/{id}/equipment",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "RFP ID")
    ),
    request_body = SetEquipment,
    responses(
        (status = 200, description = "Recomputed totals", body = EquipmentTotals),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn set_equipment<R: RfpRepository>(
    State(service): State<Arc<RfpService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<SetEquipment>,
) -> RfpResult<Json<EquipmentTotals>> {
    let totals = service.set_equipment(id, input).await?;
    Ok(Json(totals))
}
