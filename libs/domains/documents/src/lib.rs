//! Documents Domain
//!
//! Versioned document generation, storage and retention.
//!
//! Generated documents carry a `_v<N>` suffix before the extension;
//! the next version is one past the highest stored version, so pruned
//! numbers are never handed out again. Each (entity, base name) keeps
//! at most ten versions;
//! older ones are pruned when a new version is written. Allocation and
//! write are serialized per document through a keyed async mutex in
//! [`service`]. The CDN is reached through the [`storage::ObjectStore`]
//! trait; rendering through [`storage::DocumentRenderer`].

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod storage;
pub mod version;

// Re-export commonly used types
pub use error::{DocumentError, DocumentResult};
pub use models::{DocumentFilter, FileRecord, GenerateDocument, VersionAllocation};
pub use postgres::PgFileRepository;
pub use repository::FileRepository;
pub use service::DocumentService;
pub use storage::{
    CdnConfig, DocumentRenderer, HttpCdnStore, InMemoryObjectStore, JsonRenderer, ObjectStore,
};
