use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
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
use uuid::Uuid;

use crate::error::DocumentResult;
use crate::models::{DocumentFilter, FileRecord, GenerateDocument, VersionAllocation};
use crate::repository::FileRepository;
use crate::service::DocumentService;
use crate::storage::ObjectStore;

const TAG: &str = "documents";

/// OpenAPI documentation for the documents API
#[derive(OpenApi)]
#[openapi(
    paths(generate_document, list_documents, get_document, delete_document),
    components(
        schemas(FileRecord, GenerateDocument, DocumentFilter, VersionAllocation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Versioned document generation and retrieval")
    )
)]
pub struct ApiDoc;

/// Create the documents router
pub fn router<R, S>(service: DocumentService<R, S>) -> Router
where
    R: FileRepository + 'static,
    S: ObjectStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/{entity_type}/{entity_id}",
            get(list_documents).post(generate_document),
        )
        .route("/{id}", get(get_document).delete(delete_document))
        .with_state(shared_service)
}

/// Generate and store a new document version for an entity
#[utoipa::path(
    post,
    path = "/{entity_type}/{entity_id}",
    tag = TAG,
    params(
        ("entity_type" = String, Path, description = "Owning entity kind"),
        ("entity_id" = Uuid, Path, description = "Owning entity ID")
    ),
    request_body = GenerateDocument,
    responses(
        (status = 201, description = "Document version created", body = FileRecord),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, description = "CDN upload failed"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn generate_document<R: FileRepository, S: ObjectStore>(
    State(service): State<Arc<DocumentService<R, S>>>,
    Path((entity_type, entity_id)): Path<(String, Uuid)>,
    ValidatedJson(input): ValidatedJson<GenerateDocument>,
) -> DocumentResult<impl IntoResponse> {
    let record = service.publish(&entity_type, entity_id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List an entity's documents, newest first
#[utoipa::path(
    get,
    path = "/{entity_type}/{entity_id}",
    tag = TAG,
    params(
        ("entity_type" = String, Path, description = "Owning entity kind"),
        ("entity_id" = Uuid, Path, description = "Owning entity ID"),
        DocumentFilter
    ),
    responses(
        (status = 200, description = "List of file records", body = Vec<FileRecord>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_documents<R: FileRepository, S: ObjectStore>(
    State(service): State<Arc<DocumentService<R, S>>>,
    Path((entity_type, entity_id)): Path<(String, Uuid)>,
    Query(filter): Query<DocumentFilter>,
) -> DocumentResult<Json<Vec<FileRecord>>> {
    let records = service
        .list_documents(&entity_type, entity_id, filter)
        .await?;
    Ok(Json(records))
}

/// Get a file record by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "File record ID")
    ),
    responses(
        (status = 200, description = "File record found", body = FileRecord),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_document<R: FileRepository, S: ObjectStore>(
    State(service): State<Arc<DocumentService<R, S>>>,
    UuidPath(id): UuidPath,
) -> DocumentResult<Json<FileRecord>> {
    let record = service.get_document(id).await?;
    Ok(Json(record))
}

/// Delete a document version
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "File record ID")
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_document<R: FileRepository, S: ObjectStore>(
    State(service): State<Arc<DocumentService<R, S>>>,
    UuidPath(id): UuidPath,
) -> DocumentResult<impl IntoResponse> {
    service.delete_document(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
