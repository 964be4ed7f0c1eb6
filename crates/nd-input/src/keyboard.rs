//! Keyboard event routing
//!
//! Translates host key events into buffer transitions via the configured
//! mapping. Unmapped keys are ignored.

use tracing::trace;

use crate::buffer::InputHandle;
use crate::mapping::KeyMapping;

/// A host keyboard event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Host key code, e.g. `"KeyZ"` or `"ArrowUp"`
    pub code: String,
    /// True for key-down, false for key-up
    pub pressed: bool,
}

impl KeyEvent {
    pub fn new(code: impl Into<String>, pressed: bool) -> Self {
        Self {
            code: code.into(),
            pressed,
        }
    }
}

/// Keyboard front-end feeding one session's input buffer.
pub struct Keyboard {
    mapping: KeyMapping,
    input: InputHandle,
}

impl Keyboard {
    pub fn new(mapping: KeyMapping, input: InputHandle) -> Self {
        Self { mapping, input }
    }

    /// Route one host key event into the buffer.
    pub fn handle_event(&self, event: &KeyEvent) {
        let Some(button) = self.mapping.button_for(&event.code) else {
            trace!(code = %event.code, "ignoring unmapped key");
            return;
        };
        if event.pressed {
            self.input.press(button);
        } else {
            self.input.release(button);
        }
    }
}
