//! Polled keyboard state.
//!
//! The input collaborator produces one [`KeyState`] snapshot per frame.
//! Components read it; nothing in the runtime touches input devices.

use serde::{Deserialize, Serialize};

/// Keys the runtime understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Right,
    Down,
    Left,
    Space,
    Escape,
    /// Toggles collider outlines.
    F1,
}

impl Key {
    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of keys held down during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pressed: u16,
}

impl KeyState {
    /// Snapshot with exactly `keys` held.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut state = Self::default();
        for key in keys {
            state.press(key);
        }
        state
    }

    pub fn press(&mut self, key: Key) {
        self.pressed |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.pressed &= !key.bit();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.pressed == 0
    }
}
