//! Content-addressed preimage handling for nes-deck
//!
//! Resolves opaque hash references into verified binary content, caches
//! them for the session, and mounts resolved pairs as the active
//! cartridge.

pub mod cartridge;
pub mod resolver;
pub mod store;
pub mod transport;

pub use cartridge::{load_cartridge, CartridgeRef};
pub use resolver::PreimageResolver;
pub use transport::{DirTransport, FetchTransport, HttpTransport, MemoryTransport};
