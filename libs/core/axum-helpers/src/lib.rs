//! # Axum Helpers
//!
//! Shared utilities for the Siteline HTTP services.
//!
//! - **[`errors`]**: structured error responses and the `AppError` type
//! - **[`extractors`]**: `UuidPath` and `ValidatedJson` extractors
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use server::{
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
    HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};
