// Smilekeys Key Action
// A resolved (keycode, modifiers) pair that reproduces one symbol

use std::fmt;

use crate::key::Keycode;
use crate::modifier::Modifiers;

/// Press the key at `keycode` while holding `modifiers`.
///
/// Produced by the mapping index during a rebuild and consumed by the
/// injector when synthesizing key-press events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyAction {
    pub keycode: Keycode,
    pub modifiers: Modifiers,
}

impl KeyAction {
    pub const fn new(keycode: Keycode, modifiers: Modifiers) -> Self {
        Self { keycode, modifiers }
    }

    /// A plain tap with no modifiers held
    pub const fn plain(keycode: Keycode) -> Self {
        Self::new(keycode, Modifiers::NONE)
    }

    /// A tap with shift held
    pub const fn shifted(keycode: Keycode) -> Self {
        Self::new(keycode, Modifiers::SHIFT)
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.keycode)
        } else {
            write!(f, "{}+{}", self.modifiers, self.keycode)
        }
    }
}
