use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::error::{DocumentError, DocumentResult};
use crate::models::{
    validate_entity_type, DocumentFilter, FileRecord, GenerateDocument, NewFileRecord,
    VersionAllocation,
};
use crate::repository::FileRepository;
use crate::storage::{DocumentRenderer, ObjectStore};
use crate::version;

/// Versions retained per (entity_type, entity_id, base_name)
const MAX_VERSIONS: usize = 10;

/// Service layer for document version management
///
/// Version allocation is read-allocate-prune-create; the whole sequence
/// is serialized per (entity_type, entity_id, base_name) through a
/// keyed async mutex so concurrent generators cannot allocate the same
/// version number.
pub struct DocumentService<R: FileRepository, S: ObjectStore> {
    repository: Arc<R>,
    store: Arc<S>,
    renderer: Arc<dyn DocumentRenderer>,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl<R: FileRepository, S: ObjectStore> Clone for DocumentService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            store: Arc::clone(&self.store),
            renderer: Arc::clone(&self.renderer),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<R: FileRepository, S: ObjectStore> DocumentService<R, S> {
    pub fn new(repository: R, store: S, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            repository: Arc::new(repository),
            store: Arc::new(store),
            renderer,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn check_entity_type(entity_type: &str) -> DocumentResult<()> {
        if !validate_entity_type(entity_type) {
            return Err(DocumentError::Validation(format!(
                "Invalid entity type: '{}'",
                entity_type
            )));
        }
        Ok(())
    }

    fn lock_key(entity_type: &str, entity_id: Uuid, base_name: &str) -> String {
        format!("{}:{}:{}", entity_type, entity_id, base_name)
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }

    /// Drop the map entry once no task holds a handle to it anymore.
    ///
    /// Handles are only cloned out under the map lock, so a count of
    /// one here means the map's own reference is the last one and the
    /// entry can go. Keys are caller-supplied, the map must not grow
    /// for the life of the process.
    async fn release_key_lock(&self, key: &str) {
        let mut locks = self.locks.lock().await;
        if let Some(entry) = locks.get(key) {
            if Arc::strong_count(entry) == 1 {
                locks.remove(key);
            }
        }
    }

    /// Allocate the next version and prune old records down to the
    /// retention cap. Caller must hold the key lock.
    async fn allocate_locked(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        base_name: &str,
    ) -> DocumentResult<VersionAllocation> {
        // Newest first
        let existing = self
            .repository
            .list_versions(entity_type, entity_id, base_name)
            .await?;

        let next_version = version::next_version(existing.iter().map(|r| r.filename.as_str()));

        let mut cleaned_up = 0;
        if existing.len() >= MAX_VERSIONS {
            // Keep the 9 newest; with the incoming write that makes 10
            for record in existing.iter().skip(MAX_VERSIONS - 1) {
                if let Err(e) = self.store.delete(&record.url).await {
                    // Best-effort: an unreachable CDN must not block pruning
                    tracing::warn!(
                        file_id = %record.id,
                        url = %record.url,
                        error = %e,
                        "CDN delete failed during version pruning"
                    );
                }

                self.repository.delete(record.id).await?;
                cleaned_up += 1;
            }
        }

        tracing::info!(
            entity_type,
            entity_id = %entity_id,
            base_name,
            next_version,
            cleaned_up,
            "Allocated document version"
        );

        Ok(VersionAllocation {
            next_version,
            cleaned_up,
        })
    }

    /// Allocate the next version number for a document, pruning old
    /// versions past the retention cap.
    pub async fn register_new_version(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        base_name: &str,
    ) -> DocumentResult<VersionAllocation> {
        Self::check_entity_type(entity_type)?;

        let key = Self::lock_key(entity_type, entity_id, base_name);
        let lock = self.key_lock(&key).await;

        let result = {
            let _guard = lock.lock().await;
            self.allocate_locked(entity_type, entity_id, base_name).await
        };

        drop(lock);
        self.release_key_lock(&key).await;

        result
    }

    /// Render, version, upload and record a new document.
    ///
    /// Upload failure surfaces as a 502 and nothing is inserted.
    pub async fn publish(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        input: GenerateDocument,
    ) -> DocumentResult<FileRecord> {
        Self::check_entity_type(entity_type)?;
        input
            .validate()
            .map_err(|e| DocumentError::Validation(e.to_string()))?;

        let bytes = self.renderer.render(&input.data)?;
        let content_type = self.renderer.content_type().to_string();

        let key = Self::lock_key(entity_type, entity_id, &input.base_name);
        let lock = self.key_lock(&key).await;

        let result = {
            let _guard = lock.lock().await;
            self.publish_locked(entity_type, entity_id, &input, bytes, content_type)
                .await
        };

        drop(lock);
        self.release_key_lock(&key).await;

        result
    }

    async fn publish_locked(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        input: &GenerateDocument,
        bytes: Vec<u8>,
        content_type: String,
    ) -> DocumentResult<FileRecord> {
        let allocation = self
            .allocate_locked(entity_type, entity_id, &input.base_name)
            .await?;

        let filename =
            version::versioned_filename(&input.base_name, allocation.next_version, &input.extension);

        let url = self.store.upload(&filename, &content_type, bytes).await?;

        let record = self
            .repository
            .insert(NewFileRecord {
                entity_type: entity_type.to_string(),
                entity_id,
                filename,
                url,
                content_type,
            })
            .await?;

        tracing::info!(
            file_id = %record.id,
            filename = %record.filename,
            "Published document version"
        );

        Ok(record)
    }

    /// List an entity's documents, newest first
    pub async fn list_documents(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        filter: DocumentFilter,
    ) -> DocumentResult<Vec<FileRecord>> {
        Self::check_entity_type(entity_type)?;

        match filter.base_name {
            Some(base_name) => {
                self.repository
                    .list_versions(entity_type, entity_id, &base_name)
                    .await
            }
            None => self.repository.list_by_entity(entity_type, entity_id).await,
        }
    }

    /// Get a single file record
    pub async fn get_document(&self, id: Uuid) -> DocumentResult<FileRecord> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Delete a document version: best-effort CDN delete, hard DB delete
    pub async fn delete_document(&self, id: Uuid) -> DocumentResult<()> {
        let record = self.get_document(id).await?;

        if let Err(e) = self.store.delete(&record.url).await {
            tracing::warn!(
                file_id = %id,
                url = %record.url,
                error = %e,
                "CDN delete failed; removing record anyway"
            );
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(DocumentError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockFileRepository;
    use crate::storage::{MockDocumentRenderer, MockObjectStore};
    use chrono::{Duration, Utc};

    fn record(base: &str, version: u32, age_minutes: i64) -> FileRecord {
        FileRecord {
            id: Uuid::now_v7(),
            entity_type: "rfp".to_string(),
            entity_id: Uuid::nil(),
            filename: format!("{}_v{}.pdf", base, version),
            url: format!("https://cdn.example.com/{}_v{}.pdf", base, version),
            content_type: "application/pdf".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    fn renderer_stub() -> Arc<dyn DocumentRenderer> {
        let mut renderer = MockDocumentRenderer::new();
        renderer
            .expect_content_type()
            .return_const("application/pdf".to_string());
        renderer
            .expect_render()
            .returning(|_| Ok(b"rendered".to_vec()));
        Arc::new(renderer)
    }

    fn generate_input(base: &str) -> GenerateDocument {
        GenerateDocument {
            base_name: base.to_string(),
            extension: "pdf".to_string(),
            data: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn test_versions_allocate_sequentially() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions()
            .returning(|_, _, _| Ok(vec![record("proposal", 2, 1), record("proposal", 1, 2)]));

        let service = DocumentService::new(repo, MockObjectStore::new(), renderer_stub());

        let allocation = service
            .register_new_version("rfp", Uuid::nil(), "proposal")
            .await
            .unwrap();

        assert_eq!(allocation.next_version, 3);
        assert_eq!(allocation.cleaned_up, 0);
    }

    #[tokio::test]
    async fn test_first_version_is_one() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions().returning(|_, _, _| Ok(vec![]));

        let service = DocumentService::new(repo, MockObjectStore::new(), renderer_stub());

        let allocation = service
            .register_new_version("rfp", Uuid::nil(), "proposal")
            .await
            .unwrap();

        assert_eq!(allocation.next_version, 1);
    }

    #[tokio::test]
    async fn test_eleventh_write_prunes_to_retention_cap() {
        // Ten existing versions, newest first: v10 .. v1
        let existing: Vec<FileRecord> = (1..=10)
            .rev()
            .enumerate()
            .map(|(age, v)| record("proposal", v, age as i64))
            .collect();
        let oldest_id = existing.last().unwrap().id;
        let oldest_url = existing.last().unwrap().url.clone();

        let mut repo = MockFileRepository::new();
        repo.expect_list_versions()
            .returning(move |_, _, _| Ok(existing.clone()));
        repo.expect_delete()
            .with(mockall::predicate::eq(oldest_id))
            .times(1)
            .returning(|_| Ok(true));

        let mut store = MockObjectStore::new();
        store
            .expect_delete()
            .withf(move |url| url == oldest_url)
            .times(1)
            .returning(|_| Ok(()));

        let service = DocumentService::new(repo, store, renderer_stub());

        let allocation = service
            .register_new_version("rfp", Uuid::nil(), "proposal")
            .await
            .unwrap();

        // Only the record beyond the 9 newest is pruned; with the
        // incoming write the entity ends at exactly 10 versions
        assert_eq!(allocation.next_version, 11);
        assert_eq!(allocation.cleaned_up, 1);
    }

    #[tokio::test]
    async fn test_cdn_delete_failure_does_not_block_pruning() {
        let existing: Vec<FileRecord> = (1..=10)
            .rev()
            .enumerate()
            .map(|(age, v)| record("proposal", v, age as i64))
            .collect();

        let mut repo = MockFileRepository::new();
        repo.expect_list_versions()
            .returning(move |_, _, _| Ok(existing.clone()));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let mut store = MockObjectStore::new();
        store
            .expect_delete()
            .returning(|_| Err(DocumentError::CdnDelete("connection refused".to_string())));

        let service = DocumentService::new(repo, store, renderer_stub());

        let allocation = service
            .register_new_version("rfp", Uuid::nil(), "proposal")
            .await
            .unwrap();

        assert_eq!(allocation.cleaned_up, 1);
    }

    #[tokio::test]
    async fn test_publish_inserts_versioned_record() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions()
            .returning(|_, _, _| Ok(vec![record("proposal", 1, 1)]));
        repo.expect_insert()
            .withf(|input| input.filename == "proposal_v2.pdf")
            .returning(|input| {
                Ok(FileRecord {
                    id: Uuid::now_v7(),
                    entity_type: input.entity_type,
                    entity_id: input.entity_id,
                    filename: input.filename,
                    url: input.url,
                    content_type: input.content_type,
                    created_at: Utc::now(),
                })
            });

        let mut store = MockObjectStore::new();
        store
            .expect_upload()
            .withf(|filename, content_type, _| {
                filename == "proposal_v2.pdf" && content_type == "application/pdf"
            })
            .returning(|filename, _, _| Ok(format!("https://cdn.example.com/{}", filename)));

        let service = DocumentService::new(repo, store, renderer_stub());

        let published = service
            .publish("rfp", Uuid::nil(), generate_input("proposal"))
            .await
            .unwrap();

        assert_eq!(published.filename, "proposal_v2.pdf");
        assert_eq!(published.url, "https://cdn.example.com/proposal_v2.pdf");
    }

    #[tokio::test]
    async fn test_publish_upload_failure_inserts_nothing() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions().returning(|_, _, _| Ok(vec![]));
        repo.expect_insert().times(0);

        let mut store = MockObjectStore::new();
        store
            .expect_upload()
            .returning(|_, _, _| Err(DocumentError::CdnUpload("503 from CDN".to_string())));

        let service = DocumentService::new(repo, store, renderer_stub());

        let result = service
            .publish("rfp", Uuid::nil(), generate_input("proposal"))
            .await;

        assert!(matches!(result, Err(DocumentError::CdnUpload(_))));
    }

    #[tokio::test]
    async fn test_publish_rejects_bad_base_name() {
        let service = DocumentService::new(
            MockFileRepository::new(),
            MockObjectStore::new(),
            renderer_stub(),
        );

        let result = service
            .publish("rfp", Uuid::nil(), generate_input("../etc/passwd"))
            .await;

        assert!(matches!(result, Err(DocumentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_lock_map_does_not_retain_completed_keys() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions().returning(|_, _, _| Ok(vec![]));

        let service = DocumentService::new(repo, MockObjectStore::new(), renderer_stub());

        // Distinct documents across distinct entities
        for n in 0..4u128 {
            service
                .register_new_version("rfp", Uuid::from_u128(n), "proposal")
                .await
                .unwrap();
        }

        assert!(service.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_lock_map_is_pruned_after_failed_publish() {
        let mut repo = MockFileRepository::new();
        repo.expect_list_versions().returning(|_, _, _| Ok(vec![]));

        let mut store = MockObjectStore::new();
        store
            .expect_upload()
            .returning(|_, _, _| Err(DocumentError::CdnUpload("503 from CDN".to_string())));

        let service = DocumentService::new(repo, store, renderer_stub());

        let result = service
            .publish("rfp", Uuid::nil(), generate_input("proposal"))
            .await;

        assert!(result.is_err());
        assert!(service.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_invalid_entity_type() {
        let service = DocumentService::new(
            MockFileRepository::new(),
            MockObjectStore::new(),
            renderer_stub(),
        );

        let result = service
            .register_new_version("not valid!", Uuid::nil(), "proposal")
            .await;

        assert!(matches!(result, Err(DocumentError::Validation(_))));
    }
}
