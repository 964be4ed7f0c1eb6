//! Preimage store layout
//!
//! The on-disk store is a flat directory of `<hash>.bin` files, the same
//! layout the content server serves and `DirTransport` reads.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use nd_core::ContentHash;

/// Path of the preimage file for a hash within a store directory.
pub fn preimage_path(dir: &Path, hash: &ContentHash) -> PathBuf {
    dir.join(format!("{}.bin", hash.to_hex()))
}

/// Digest content and write it into the store; returns its hash.
pub fn write_preimage(dir: &Path, bytes: &[u8]) -> std::io::Result<ContentHash> {
    let hash = ContentHash::digest(bytes);
    fs::create_dir_all(dir)?;
    let path = preimage_path(dir, &hash);
    fs::write(&path, bytes)?;
    info!(%hash, path = %path.display(), "wrote preimage");
    Ok(hash)
}
