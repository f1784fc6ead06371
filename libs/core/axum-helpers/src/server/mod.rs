//! Server infrastructure: router assembly, health endpoints, graceful
//! shutdown coordination.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{health_router, run_health_checks, HealthCheckFuture, HealthResponse};
pub use shutdown::{coordinated_shutdown, shutdown_signal, ShutdownCoordinator};
