//! Object storage and rendering collaborators.
//!
//! The service talks to the CDN through the [`ObjectStore`] trait and
//! produces document bytes through [`DocumentRenderer`]. Production
//! wires in [`HttpCdnStore`]; tests and local development use
//! [`InMemoryObjectStore`].

use async_trait::async_trait;
use core_config::{env_or_default, ConfigError, FromEnv};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{DocumentError, DocumentResult};

/// Where uploaded document versions live
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object and return its public URL
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DocumentResult<String>;

    /// Delete an object by its URL
    async fn delete(&self, url: &str) -> DocumentResult<()>;
}

/// Renders a document payload into bytes
///
/// Concrete Word/Excel renderers plug in here; the crate itself only
/// ships [`JsonRenderer`] for wiring and tests.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the rendered output
    fn content_type(&self) -> &str;

    /// Render the payload into the output format
    fn render(&self, data: &serde_json::Value) -> DocumentResult<Vec<u8>>;
}

/// CDN connection settings
#[derive(Debug, Clone)]
pub struct CdnConfig {
    pub base_url: String,
}

impl FromEnv for CdnConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_or_default("CDN_BASE_URL", "http://localhost:9000/siteline"),
        })
    }
}

/// CDN-backed object store speaking plain HTTP PUT/DELETE
pub struct HttpCdnStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCdnStore {
    pub fn new(config: CdnConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }
}

#[async_trait]
impl ObjectStore for HttpCdnStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DocumentResult<String> {
        let url = self.object_url(filename);

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| DocumentError::CdnUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DocumentError::CdnUpload(format!(
                "unexpected status {} for {}",
                response.status(),
                url
            )));
        }

        tracing::debug!(%url, "Uploaded document to CDN");
        Ok(url)
    }

    async fn delete(&self, url: &str) -> DocumentResult<()> {
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| DocumentError::CdnDelete(e.to_string()))?;

        // 404 counts as deleted
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(DocumentError::CdnDelete(format!(
                "unexpected status {} for {}",
                response.status(),
                url
            )));
        }

        tracing::debug!(%url, "Deleted document from CDN");
        Ok(())
    }
}

/// In-memory object store for tests and local development
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.objects.read().await.contains_key(url)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> DocumentResult<String> {
        let url = format!("memory://{}", filename);
        self.objects.write().await.insert(url.clone(), bytes);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> DocumentResult<()> {
        self.objects.write().await.remove(url);
        Ok(())
    }
}

/// Renders the payload as pretty-printed JSON
///
/// Stands in for the real Word/Excel renderers in tests and local
/// development.
#[derive(Debug, Default, Clone)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn content_type(&self) -> &str {
        "application/json"
    }

    fn render(&self, data: &serde_json::Value) -> DocumentResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| DocumentError::Render(e.to_string()))
    }
}
