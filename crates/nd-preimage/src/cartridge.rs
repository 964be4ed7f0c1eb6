//! Cartridge loading
//!
//! A cartridge is a pair of preimages, one static (code/ROM image) and one
//! dynamic (serialized machine state), that together define a session's
//! loadable image.

use tracing::info;

use nd_core::error::{DeckError, HashError};
use nd_core::{ContentHash, CoreModule};

use crate::resolver::PreimageResolver;
use crate::transport::FetchTransport;

/// Reference to one session's cartridge pair. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeRef {
    pub static_hash: ContentHash,
    pub dyn_hash: ContentHash,
}

impl CartridgeRef {
    pub fn new(static_hash: ContentHash, dyn_hash: ContentHash) -> Self {
        Self {
            static_hash,
            dyn_hash,
        }
    }

    /// Build a reference from two hex hash strings.
    pub fn parse(static_hash: &str, dyn_hash: &str) -> Result<Self, HashError> {
        Ok(Self {
            static_hash: ContentHash::parse(static_hash)?,
            dyn_hash: ContentHash::parse(dyn_hash)?,
        })
    }
}

/// Resolve, register and activate a cartridge pair.
///
/// Both preimages are fully resolved and registered before activation;
/// there is no speculative or partial registration. Any failure aborts the
/// load and propagates — this layer does not retry or substitute defaults.
pub async fn load_cartridge<T: FetchTransport, M: CoreModule>(
    resolver: &mut PreimageResolver<T>,
    module: &mut M,
    cartridge: &CartridgeRef,
) -> Result<(), DeckError> {
    resolver
        .resolve_and_register(module, &cartridge.static_hash)
        .await?;
    resolver
        .resolve_and_register(module, &cartridge.dyn_hash)
        .await?;

    module.activate(&cartridge.static_hash, &cartridge.dyn_hash)?;
    info!(
        static_hash = %cartridge.static_hash,
        dyn_hash = %cartridge.dyn_hash,
        "cartridge activated"
    );
    Ok(())
}
