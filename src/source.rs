//! # Image Sources
//!
//! Fetch backends for asset bytes. The renderer only sees the
//! [`ImageSource`] trait, so tests can substitute an in-memory source and
//! the CLI can point at either a deployed HTTP tree or a local directory.

use async_trait::async_trait;
use tracing::debug;

use crate::error::LienzoError;

/// Fetches raw asset bytes for a resource identifier.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, LienzoError>;
}

/// HTTP(S) backend.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<HttpSource, LienzoError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lienzo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LienzoError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(HttpSource { client })
    }

    pub fn with_client(client: reqwest::Client) -> HttpSource {
        HttpSource { client }
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, LienzoError> {
        debug!(url = identifier, "fetching asset");
        let response = self
            .client
            .get(identifier)
            .send()
            .await
            .map_err(|e| LienzoError::Fetch(format!("Failed to download {}: {}", identifier, e)))?;
        if !response.status().is_success() {
            return Err(LienzoError::Fetch(format!(
                "Failed to download {}: HTTP {}",
                identifier,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LienzoError::Fetch(format!("Failed to read {}: {}", identifier, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Filesystem backend; identifiers are paths.
pub struct FileSource;

#[async_trait]
impl ImageSource for FileSource {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, LienzoError> {
        debug!(path = identifier, "reading asset");
        tokio::fs::read(identifier)
            .await
            .map_err(|e| LienzoError::Fetch(format!("Failed to read {}: {}", identifier, e)))
    }
}

/// Dispatches by identifier scheme: `http://`/`https://` go over the
/// network, everything else is read from disk.
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
}

impl DefaultSource {
    pub fn new() -> Result<DefaultSource, LienzoError> {
        Ok(DefaultSource {
            http: HttpSource::new()?,
            file: FileSource,
        })
    }
}

#[async_trait]
impl ImageSource for DefaultSource {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, LienzoError> {
        if identifier.starts_with("http://") || identifier.starts_with("https://") {
            self.http.fetch(identifier).await
        } else {
            self.file.fetch(identifier).await
        }
    }
}
