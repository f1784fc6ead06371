use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the files table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub filename: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub content_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::FileRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            filename: model.filename,
            url: model.url,
            content_type: model.content_type,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::NewFileRecord> for ActiveModel {
    fn from(input: crate::models::NewFileRecord) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            entity_type: Set(input.entity_type),
            entity_id: Set(input.entity_id),
            filename: Set(input.filename),
            url: Set(input.url),
            content_type: Set(input.content_type),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
