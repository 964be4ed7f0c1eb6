//! Controller input handling for nes-deck
//!
//! Reconciles asynchronous host key events with the core's synchronous
//! per-tick input contract through an explicit committed/pending buffer.

pub mod buffer;
pub mod keyboard;
pub mod mapping;

pub use buffer::{InputHandle, InputStateBuffer};
pub use keyboard::{KeyEvent, Keyboard};
pub use mapping::{Button, KeyMapping};
