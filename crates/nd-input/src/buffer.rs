//! Committed/pending input state buffer
//!
//! Key events arrive asynchronously while the core consumes input once per
//! tick. The buffer keeps two slots per button: `committed` is the
//! authoritative vector read by the driver, `pending` holds deferred
//! updates that become visible only at the next explicit `commit()`.
//!
//! Presses take effect immediately; releases are deferred until the commit
//! that ends the current tick. Pending entries are intentionally not
//! cleared on commit and are re-applied on every subsequent commit, which
//! is idempotent. A stale pending release therefore overrides a re-press
//! at the next commit.

use std::sync::Arc;

use parking_lot::Mutex;

use nd_core::BUTTON_COUNT;

use crate::mapping::Button;

/// Two-slot input state machine.
#[derive(Debug, Default)]
pub struct InputStateBuffer {
    committed: [bool; BUTTON_COUNT],
    pending: [Option<bool>; BUTTON_COUNT],
}

impl InputStateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press: visible on the very next read.
    pub fn press(&mut self, button: Button) {
        self.committed[button.index()] = true;
    }

    /// Record a release: deferred until the next `commit()`.
    pub fn release(&mut self, button: Button) {
        self.pending[button.index()] = Some(false);
    }

    /// Apply all pending entries to the committed vector.
    ///
    /// Pending entries persist across commits.
    pub fn commit(&mut self) {
        for (slot, pending) in self.committed.iter_mut().zip(self.pending.iter()) {
            if let Some(value) = pending {
                *slot = *value;
            }
        }
    }

    /// Committed button vector in canonical order.
    pub fn snapshot(&self) -> [bool; BUTTON_COUNT] {
        self.committed
    }
}

/// Shared handle to one session's input buffer.
///
/// The buffer is owned by the session and passed by handle to every
/// dependent component; the mutex guarantees that `commit()` never
/// interleaves with a tick's `snapshot()`.
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    inner: Arc<Mutex<InputStateBuffer>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, button: Button) {
        self.inner.lock().press(button);
    }

    pub fn release(&self, button: Button) {
        self.inner.lock().release(button);
    }

    pub fn commit(&self) {
        self.inner.lock().commit();
    }

    pub fn snapshot(&self) -> [bool; BUTTON_COUNT] {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_immediate() {
        let mut buffer = InputStateBuffer::new();
        buffer.press(Button::A);
        assert!(buffer.snapshot()[Button::A.index()]);
    }

    #[test]
    fn test_release_is_deferred_until_commit() {
        let mut buffer = InputStateBuffer::new();
        buffer.press(Button::B);
        buffer.release(Button::B);
        // Release is not yet visible.
        assert!(buffer.snapshot()[Button::B.index()]);

        buffer.commit();
        assert!(!buffer.snapshot()[Button::B.index()]);
    }

    #[test]
    fn test_pending_persists_across_commits() {
        let mut buffer = InputStateBuffer::new();
        buffer.press(Button::Up);
        buffer.release(Button::Up);
        buffer.commit();
        assert!(!buffer.snapshot()[Button::Up.index()]);

        // A new press followed by a commit is undone by the stale pending
        // entry.
        buffer.press(Button::Up);
        assert!(buffer.snapshot()[Button::Up.index()]);
        buffer.commit();
        assert!(!buffer.snapshot()[Button::Up.index()]);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut buffer = InputStateBuffer::new();
        buffer.release(Button::Left);
        buffer.commit();
        let first = buffer.snapshot();
        buffer.commit();
        assert_eq!(buffer.snapshot(), first);
    }

    #[test]
    fn test_handle_is_shared() {
        let handle = InputHandle::new();
        let other = handle.clone();
        other.press(Button::Start);
        assert!(handle.snapshot()[Button::Start.index()]);
    }
}
