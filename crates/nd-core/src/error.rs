//! Error types for the nes-deck driver

use thiserror::Error;

use crate::hash::ContentHash;

/// Main error type for the driver
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Hash error: {0}")]
    Hash(#[from] HashError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Module error: {0}")]
    Module(#[from] ModuleError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Hash parsing errors
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Malformed hash: {0}")]
    Malformed(String),
}

/// Preimage fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Preimage not found: {0}")]
    NotFound(ContentHash),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Fetch failed with HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Fetched content for {requested} hashes to {actual}")]
    HashMismatch {
        requested: ContentHash,
        actual: ContentHash,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Module boundary errors
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Preimage not registered: {0}")]
    NotRegistered(ContentHash),

    #[error("No active cartridge")]
    NoCartridge,

    #[error("Session not started")]
    NotStarted,

    #[error("Frame buffer has {actual} bytes, expected {expected}")]
    BadFrameBuffer { actual: usize, expected: usize },

    #[error("Module internal error: {0}")]
    Internal(String),
}

/// Telemetry decode errors, isolated to a single poll tick
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Activity report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Activity report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Activity query failed: {0}")]
    Module(#[from] ModuleError),
}

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DeckError>;
