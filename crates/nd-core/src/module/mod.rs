//! Emulator module boundary
//!
//! The emulator core is an opaque, sandboxed collaborator consumed through
//! a fixed operation set. Its internals (CPU, PPU, timing) are out of scope
//! for this layer; everything here is the protocol around it.

pub mod null;

pub use null::NullModule;

use crate::error::ModuleError;
use crate::hash::ContentHash;

/// Output width in pixels
pub const NES_WIDTH: usize = 256;
/// Output height in pixels
pub const NES_HEIGHT: usize = 240;
/// One RGBA frame, as handed to `step`
pub const FRAME_BYTES: usize = NES_WIDTH * NES_HEIGHT * 4;

/// Number of controller buttons in the input vector
pub const BUTTON_COUNT: usize = 8;

/// Capability surface of the sandboxed emulator core.
///
/// Mutation-bearing setup calls (`register`, `activate`, `start`) must
/// complete before the tick loop or the activity poller runs. `step` is
/// synchronous and blocking; `query_activity` is non-mutating and may
/// interleave with ticks.
pub trait CoreModule: Send + Sync {
    /// Make content addressable by its digest inside the module.
    fn register(&mut self, hash: &ContentHash, bytes: &[u8]) -> Result<(), ModuleError>;

    /// Mount the paired content as the active session image.
    ///
    /// Fails with `ModuleError::NotRegistered` if either preimage was never
    /// registered. This layer does not retry or substitute defaults.
    fn activate(
        &mut self,
        static_hash: &ContentHash,
        dyn_hash: &ContentHash,
    ) -> Result<(), ModuleError>;

    /// Begin session execution.
    fn start(&mut self) -> Result<(), ModuleError>;

    /// Advance one discrete tick and render one frame into `frame`.
    ///
    /// `input` is the committed button vector in canonical order
    /// (A, B, Select, Start, Up, Down, Left, Right); `frame` must be exactly
    /// [`FRAME_BYTES`] long and is written in place.
    fn step(&mut self, input: &[bool; BUTTON_COUNT], frame: &mut [u8]) -> Result<(), ModuleError>;

    /// Return a point-in-time telemetry snapshot as UTF-8 JSON bytes.
    fn query_activity(&self) -> Result<Vec<u8>, ModuleError>;
}
