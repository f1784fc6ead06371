use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{DocumentError, DocumentResult},
    models::{FileRecord, NewFileRecord},
    repository::FileRepository,
};

pub struct PgFileRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, input: NewFileRecord) -> DocumentResult<FileRecord> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(file_id = %model.id, filename = %model.filename, "Inserted file record");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> DocumentResult<Option<FileRecord>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> DocumentResult<Vec<FileRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::EntityType.eq(entity_type))
            .filter(entity::Column::EntityId.eq(entity_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_versions(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        base_name: &str,
    ) -> DocumentResult<Vec<FileRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::EntityType.eq(entity_type))
            .filter(entity::Column::EntityId.eq(entity_id))
            .filter(entity::Column::Filename.starts_with(format!("{}_v", base_name)))
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: Uuid) -> DocumentResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(file_id = %id, "Deleted file record");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
