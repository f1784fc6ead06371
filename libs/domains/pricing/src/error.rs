use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Markup rule not found: {0}")]
    RuleNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Convert PricingError to AppError for standardized error responses
impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::RuleNotFound(id) => {
                AppError::NotFound(format!("Markup rule {} not found", id))
            }
            PricingError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            PricingError::DuplicateSku(sku) => {
                AppError::Conflict(format!("Product with SKU '{}' already exists", sku))
            }
            PricingError::Validation(msg) => AppError::BadRequest(msg),
            PricingError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
