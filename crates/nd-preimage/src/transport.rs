//! Preimage fetch transports
//!
//! A transport turns a content hash into the bytes it addresses. The HTTP
//! transport speaks the content server's `GET /preimages/{hash}` interface;
//! the directory transport reads the `<hash>.bin` layout the encoder
//! writes; the in-memory transport backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use tracing::debug;

use nd_core::error::FetchError;
use nd_core::ContentHash;

/// Asynchronous source of preimage content.
///
/// Transports do not retry; retry policy, if any, belongs below this
/// interface.
pub trait FetchTransport {
    fn fetch(
        &self,
        hash: &ContentHash,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// HTTP content-fetch transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn preimage_url(&self, hash: &ContentHash) -> String {
        format!(
            "{}/preimages/{}",
            self.base_url.trim_end_matches('/'),
            hash.to_hex()
        )
    }
}

impl FetchTransport for HttpTransport {
    async fn fetch(&self, hash: &ContentHash) -> Result<Vec<u8>, FetchError> {
        let url = self.preimage_url(hash);
        debug!(%url, "fetching preimage");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(hash.clone())),
            status if !status.is_success() => Err(FetchError::HttpStatus {
                status: status.as_u16(),
            }),
            _ => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| FetchError::Network(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// Filesystem transport reading `<root>/<hash>.bin`.
pub struct DirTransport {
    root: PathBuf,
}

impl DirTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FetchTransport for DirTransport {
    async fn fetch(&self, hash: &ContentHash) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(format!("{}.bin", hash.to_hex()));
        debug!(path = %path.display(), "reading preimage");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(hash.clone()))
            }
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}

/// In-memory transport for tests, with a fetch counter.
#[derive(Default)]
pub struct MemoryTransport {
    contents: HashMap<ContentHash, Vec<u8>>,
    fetches: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert content under its own digest; returns the hash.
    pub fn insert(&mut self, bytes: impl Into<Vec<u8>>) -> ContentHash {
        let bytes = bytes.into();
        let hash = ContentHash::digest(&bytes);
        self.contents.insert(hash.clone(), bytes);
        hash
    }

    /// Insert content under an arbitrary hash.
    pub fn insert_as(&mut self, hash: ContentHash, bytes: impl Into<Vec<u8>>) {
        self.contents.insert(hash, bytes.into());
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FetchTransport for MemoryTransport {
    async fn fetch(&self, hash: &ContentHash) -> Result<Vec<u8>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.contents
            .get(hash)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(hash.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preimage_url() {
        let transport = HttpTransport::new("http://localhost:8080/");
        let hash = ContentHash::parse("0xcafe").unwrap();
        assert_eq!(
            transport.preimage_url(&hash),
            "http://localhost:8080/preimages/cafe"
        );
    }

    #[tokio::test]
    async fn test_dir_transport() {
        let dir = tempfile::tempdir().unwrap();
        let hash = ContentHash::digest(b"content");
        std::fs::write(dir.path().join(format!("{}.bin", hash.to_hex())), b"content").unwrap();

        let transport = DirTransport::new(dir.path());
        assert_eq!(transport.fetch(&hash).await.unwrap(), b"content");

        let missing = ContentHash::digest(b"missing");
        assert!(matches!(
            transport.fetch(&missing).await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_transport_counts_fetches() {
        let mut transport = MemoryTransport::new();
        let hash = transport.insert(b"bytes".to_vec());

        assert_eq!(transport.fetch(&hash).await.unwrap(), b"bytes");
        assert_eq!(transport.fetch(&hash).await.unwrap(), b"bytes");
        assert_eq!(transport.fetch_count(), 2);
    }
}
