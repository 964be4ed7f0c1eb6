//! Input mapping
//!
//! Maps host key codes to NES controller buttons.

use std::collections::HashMap;

use nd_core::BUTTON_COUNT;

/// NES controller buttons, in the canonical input-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    /// All buttons in canonical order.
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Index of this button in the input vector.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Button> {
        Self::ALL.get(index).copied()
    }
}

/// Mapping from host key codes to controller buttons.
pub struct KeyMapping {
    mappings: HashMap<String, Button>,
}

impl KeyMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Create the default keyboard mapping
    pub fn default_keyboard_mapping() -> Self {
        let mut mapping = Self::new();

        // Face buttons
        mapping.map_key("KeyZ", Button::A);
        mapping.map_key("KeyX", Button::B);

        // Special buttons
        mapping.map_key("ShiftRight", Button::Select);
        mapping.map_key("Enter", Button::Start);

        // D-pad
        mapping.map_key("ArrowUp", Button::Up);
        mapping.map_key("ArrowDown", Button::Down);
        mapping.map_key("ArrowLeft", Button::Left);
        mapping.map_key("ArrowRight", Button::Right);

        mapping
    }

    /// Map a host key code to a button
    pub fn map_key(&mut self, code: &str, button: Button) {
        self.mappings.insert(code.to_string(), button);
    }

    /// Look up the button for a host key code
    pub fn button_for(&self, code: &str) -> Option<Button> {
        self.mappings.get(code).copied()
    }
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self::default_keyboard_mapping()
    }
}
