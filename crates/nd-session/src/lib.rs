//! Session layer for nes-deck
//!
//! Drives the emulator module through discrete ticks, presents frames to
//! an output surface, and polls the module's activity report out of band.

pub mod driver;
pub mod poller;
pub mod session;
pub mod stats;
pub mod surface;

pub use driver::StepDriver;
pub use poller::ActivityPoller;
pub use session::{Session, SessionControls};
pub use stats::TickStats;
pub use surface::{CaptureSurface, FrameSurface, NullSurface};
