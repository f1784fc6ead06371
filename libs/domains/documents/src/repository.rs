use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DocumentResult;
use crate::models::{FileRecord, NewFileRecord};

/// Repository trait for file record persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Insert a new file record
    async fn insert(&self, input: NewFileRecord) -> DocumentResult<FileRecord>;

    /// Get a record by ID
    async fn get_by_id(&self, id: Uuid) -> DocumentResult<Option<FileRecord>>;

    /// All records for an entity, newest first
    async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> DocumentResult<Vec<FileRecord>>;

    /// Records for one document base name (filename starts with
    /// `<base>_v`), newest first
    async fn list_versions(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        base_name: &str,
    ) -> DocumentResult<Vec<FileRecord>>;

    /// Hard-delete a record by ID
    async fn delete(&self, id: Uuid) -> DocumentResult<bool>;
}
