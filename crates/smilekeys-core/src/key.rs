// Smilekeys Key Type
// Layout-independent physical key position (protocol keycode)

use std::fmt;

/// A physical key position on the keyboard.
///
/// Keycodes identify keys independently of the active layout; which symbol a
/// keycode produces is decided by the current [`LayoutSnapshot`].
///
/// [`LayoutSnapshot`]: crate::layout::LayoutSnapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keycode(u8);

impl Keycode {
    /// Create a keycode from its raw protocol value
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Raw protocol value of this keycode
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Keycode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<Keycode> for u8 {
    fn from(keycode: Keycode) -> Self {
        keycode.0
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keycode {}", self.0)
    }
}
