//! PostgreSQL connection management for the Siteline services.
//!
//! Wraps SeaORM connection setup with pool configuration from the
//! environment, startup retry with exponential backoff, a health check
//! for readiness probes, and a migration runner.
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let config = postgres::PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "siteline_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
