//! Content hash type and hex codec
//!
//! Preimages are addressed by the digest of their content. Hashes travel
//! as hex strings (optionally `0x`-prefixed) and are stored as raw bytes.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::HashError;

/// A content digest, stored in canonical byte form.
///
/// The codec accepts any even-length hex string so it can round-trip
/// whatever identifier the content server uses; digests produced locally
/// are always 32 bytes (SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(Vec<u8>);

impl ContentHash {
    /// Parse a hex string, optionally `0x`-prefixed, into a hash.
    ///
    /// The string must have an even number of hex digits after the prefix
    /// is stripped; each byte pair decodes to one octet. Returns
    /// `HashError::Malformed` otherwise, never panics.
    pub fn parse(s: &str) -> Result<Self, HashError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() % 2 != 0 {
            return Err(HashError::Malformed(format!(
                "odd number of hex digits in {s:?}"
            )));
        }
        let bytes = hex::decode(stripped)
            .map_err(|e| HashError::Malformed(format!("invalid hex in {s:?}: {e}")))?;
        Ok(Self(bytes))
    }

    /// Build a hash directly from digest bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// SHA-256 digest of the given content.
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hasher.finalize().to_vec())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
