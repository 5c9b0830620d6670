// Smilekeys Modifier System
// Protocol modifier masks and layout shift levels

use std::fmt;
use std::ops::BitOr;

/// A combination of held modifier keys, encoded as the protocol bitmask
/// carried in key event state fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const LOCK: Modifiers = Modifiers(1 << 1);
    pub const CONTROL: Modifiers = Modifiers(1 << 2);
    pub const MOD1: Modifiers = Modifiers(1 << 3);
    pub const MOD2: Modifiers = Modifiers(1 << 4);
    pub const MOD3: Modifiers = Modifiers(1 << 5);
    pub const MOD4: Modifiers = Modifiers(1 << 6);
    pub const MOD5: Modifiers = Modifiers(1 << 7);

    /// Reconstruct from a raw protocol bitmask
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw protocol bitmask for event state fields
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True when no modifier is held
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every modifier in `other` is also set in `self`
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        const NAMES: [(Modifiers, &str); 8] = [
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::LOCK, "Lock"),
            (Modifiers::CONTROL, "Control"),
            (Modifiers::MOD1, "Mod1"),
            (Modifiers::MOD2, "Mod2"),
            (Modifiers::MOD3, "Mod3"),
            (Modifiers::MOD4, "Mod4"),
            (Modifiers::MOD5, "Mod5"),
        ];
        let mut first = true;
        for (mask, name) in NAMES {
            if self.contains(mask) {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Shift-state index used when looking up which symbol a key produces.
///
/// Only the first two levels participate in resolution: the unshifted
/// symbol and the shifted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Level {
    Base = 0,
    Shifted = 1,
}

impl Level {
    /// All levels in scan order
    pub const ALL: [Level; 2] = [Level::Base, Level::Shifted];

    /// Modifier combination that selects this level when typing
    pub const fn modifiers(self) -> Modifiers {
        match self {
            Level::Base => Modifiers::NONE,
            Level::Shifted => Modifiers::SHIFT,
        }
    }

    /// Index into per-keycode symbol tables
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Base => write!(f, "base"),
            Level::Shifted => write!(f, "shifted"),
        }
    }
}
