use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RfpError {
    #[error("RFP not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RfpResult<T> = Result<T, RfpError>;

/// Convert RfpError to AppError for standardized error responses
impl From<RfpError> for AppError {
    fn from(err: RfpError) -> Self {
        match err {
            RfpError::NotFound(id) => AppError::NotFound(format!("RFP {} not found", id)),
            RfpError::Validation(msg) => AppError::BadRequest(msg),
            RfpError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for RfpError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
