use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File record not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("CDN upload failed: {0}")]
    CdnUpload(String),

    #[error("CDN delete failed: {0}")]
    CdnDelete(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Convert DocumentError to AppError for standardized error responses
impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound(id) => {
                AppError::NotFound(format!("File record {} not found", id))
            }
            DocumentError::Validation(msg) => AppError::BadRequest(msg),
            DocumentError::Render(msg) => AppError::Internal(format!("Rendering failed: {}", msg)),
            DocumentError::CdnUpload(msg) => {
                AppError::BadGateway(format!("CDN upload failed: {}", msg))
            }
            DocumentError::CdnDelete(msg) => {
                AppError::BadGateway(format!("CDN delete failed: {}", msg))
            }
            DocumentError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
