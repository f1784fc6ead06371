use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Base names and entity types: alphanumeric with hyphens/underscores,
/// no dots (the dot separates the version suffix from the extension)
static NAME_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// File extensions: short alphanumeric ("pdf", "docx", "xlsx")
static EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{1,10}$").unwrap());

fn validate_name_segment(value: &str) -> Result<(), validator::ValidationError> {
    if !NAME_SEGMENT.is_match(value) {
        return Err(validator::ValidationError::new("invalid_name_segment"));
    }
    Ok(())
}

fn validate_extension(value: &str) -> Result<(), validator::ValidationError> {
    if !EXTENSION.is_match(value) {
        return Err(validator::ValidationError::new("invalid_extension"));
    }
    Ok(())
}

/// Stored file version record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct FileRecord {
    pub id: Uuid,
    /// Owning entity kind (e.g. "rfp", "proposal")
    pub entity_type: String,
    pub entity_id: Uuid,
    /// Versioned filename: `<base>_v<N>.<ext>`
    pub filename: String,
    /// CDN location of the uploaded object
    pub url: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

/// Internal DTO for inserting a file record
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub filename: String,
    pub url: String,
    pub content_type: String,
}

/// Result of a version allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, TS)]
#[ts(export)]
pub struct VersionAllocation {
    /// Version number the caller should write
    pub next_version: u32,
    /// Old records pruned to stay under the retention cap
    pub cleaned_up: u32,
}

/// Request body for generating a new document version
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct GenerateDocument {
    /// Document base name, without version suffix or extension
    #[validate(length(min = 1, max = 100), custom(function = "validate_name_segment"))]
    pub base_name: String,
    #[validate(custom(function = "validate_extension"))]
    pub extension: String,
    /// Payload handed to the renderer
    #[serde(default)]
    #[ts(type = "unknown")]
    pub data: serde_json::Value,
}

/// Query filters for listing document versions
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams, TS)]
#[ts(export)]
pub struct DocumentFilter {
    /// Restrict to versions of one document base name
    pub base_name: Option<String>,
}

pub(crate) fn validate_entity_type(entity_type: &str) -> bool {
    entity_type.len() <= 32 && NAME_SEGMENT.is_match(entity_type)
}
