//! Core types for the nes-deck driver
//!
//! This crate provides the foundational types, error handling and
//! configuration for the driver, plus the boundary trait through which
//! the sandboxed emulator core is consumed.

pub mod config;
pub mod error;
pub mod hash;
pub mod module;

pub use config::Config;
pub use error::{DeckError, FetchError, HashError, ModuleError, Result, TelemetryError};
pub use hash::ContentHash;
pub use module::{CoreModule, NullModule, BUTTON_COUNT, FRAME_BYTES, NES_HEIGHT, NES_WIDTH};
