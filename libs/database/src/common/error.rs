use thiserror::Error;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors surfaced by the database infrastructure layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}
