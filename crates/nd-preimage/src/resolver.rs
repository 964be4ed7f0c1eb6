//! Caching preimage resolver

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use nd_core::error::{DeckError, FetchError};
use nd_core::{ContentHash, CoreModule};

use crate::transport::FetchTransport;

/// Resolves content hashes to bytes, fetching at most once per hash.
///
/// The cache is keyed by the canonical byte form of the hash and lives for
/// the session. Resolution never retries: a fetch failure propagates to
/// the caller and aborts the dependent flow.
pub struct PreimageResolver<T: FetchTransport> {
    transport: T,
    cache: HashMap<ContentHash, Vec<u8>>,
    verify: bool,
}

impl<T: FetchTransport> PreimageResolver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: HashMap::new(),
            verify: false,
        }
    }

    /// Enable digest verification of fetched content.
    ///
    /// Off by default: the wire protocol trusts the transport. When
    /// enabled, content that does not hash to the requested digest fails
    /// resolution before anything is cached or registered.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Resolve a hash to its content, from cache or transport.
    pub async fn resolve(&mut self, hash: &ContentHash) -> Result<&[u8], FetchError> {
        match self.cache.entry(hash.clone()) {
            Entry::Occupied(entry) => {
                trace!(%hash, "preimage cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let bytes = self.transport.fetch(hash).await?;
                if self.verify {
                    let actual = ContentHash::digest(&bytes);
                    if actual != *hash {
                        return Err(FetchError::HashMismatch {
                            requested: hash.clone(),
                            actual,
                        });
                    }
                }
                debug!(%hash, len = bytes.len(), "preimage resolved");
                Ok(entry.insert(bytes))
            }
        }
    }

    /// Resolve a hash and register its content with the module.
    ///
    /// Both halves complete before this returns; dependent operations
    /// (cartridge activation) must not run until they have.
    pub async fn resolve_and_register<M: CoreModule>(
        &mut self,
        module: &mut M,
        hash: &ContentHash,
    ) -> Result<(), DeckError> {
        let bytes = self.resolve(hash).await?;
        module.register(hash, bytes)?;
        Ok(())
    }

    /// Whether the hash is already cached.
    pub fn is_cached(&self, hash: &ContentHash) -> bool {
        self.cache.contains_key(hash)
    }
}
