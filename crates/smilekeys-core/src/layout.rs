// Smilekeys Layout Snapshot
// Immutable keycode-to-symbol table for one keyboard layout state

use crate::key::Keycode;
use crate::modifier::Level;

/// The symbols produced by every physical key of the current layout.
///
/// A snapshot covers the keycode range `[min_keycode, max_keycode]` and
/// records, per keycode, the symbol at level 0 (unshifted) and level 1
/// (shifted). It is queried fresh from the session on every layout-change
/// notification and never patched in place.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    min_keycode: u8,
    symbols: Vec<[Option<char>; 2]>,
}

impl LayoutSnapshot {
    /// Create a snapshot covering `[min_keycode, max_keycode]` with no
    /// symbols assigned yet. An inverted range produces an empty snapshot.
    pub fn new(min_keycode: u8, max_keycode: u8) -> Self {
        let count = if min_keycode <= max_keycode {
            usize::from(max_keycode) - usize::from(min_keycode) + 1
        } else {
            0
        };
        Self {
            min_keycode,
            symbols: vec![[None; 2]; count],
        }
    }

    /// Assign the symbol a keycode produces at the given level.
    ///
    /// Keycodes outside the snapshot's range are ignored.
    pub fn set_symbol(&mut self, keycode: Keycode, level: Level, symbol: char) {
        if let Some(slot) = self.slot_index(keycode) {
            self.symbols[slot][level.index()] = Some(symbol);
        }
    }

    /// Symbol produced by `keycode` at `level`, if any
    pub fn symbol(&self, keycode: Keycode, level: Level) -> Option<char> {
        self.slot_index(keycode)
            .and_then(|slot| self.symbols[slot][level.index()])
    }

    /// All keycodes covered by this snapshot, in ascending order
    pub fn keycodes(&self) -> impl Iterator<Item = Keycode> + '_ {
        let min = self.min_keycode;
        (0..self.symbols.len()).map(move |offset| Keycode::from(min + offset as u8))
    }

    /// True when the snapshot covers no keycodes at all.
    ///
    /// An empty snapshot is what an absent or failed layout query yields;
    /// the mapping index treats it as "keep the previous resolutions".
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of keycodes covered
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    fn slot_index(&self, keycode: Keycode) -> Option<usize> {
        let offset = usize::from(keycode.value()).checked_sub(usize::from(self.min_keycode))?;
        (offset < self.symbols.len()).then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_symbol() {
        let mut snapshot = LayoutSnapshot::new(8, 255);
        snapshot.set_symbol(Keycode::from(38), Level::Base, ':');
        snapshot.set_symbol(Keycode::from(38), Level::Shifted, ';');

        assert_eq!(snapshot.symbol(Keycode::from(38), Level::Base), Some(':'));
        assert_eq!(snapshot.symbol(Keycode::from(38), Level::Shifted), Some(';'));
        assert_eq!(snapshot.symbol(Keycode::from(39), Level::Base), None);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut snapshot = LayoutSnapshot::new(10, 20);
        snapshot.set_symbol(Keycode::from(9), Level::Base, 'a');
        snapshot.set_symbol(Keycode::from(21), Level::Base, 'b');

        assert_eq!(snapshot.symbol(Keycode::from(9), Level::Base), None);
        assert_eq!(snapshot.symbol(Keycode::from(21), Level::Base), None);
    }

    #[test]
    fn test_keycode_range() {
        let snapshot = LayoutSnapshot::new(10, 12);
        let keycodes: Vec<_> = snapshot.keycodes().collect();
        assert_eq!(
            keycodes,
            vec![Keycode::from(10), Keycode::from(11), Keycode::from(12)]
        );
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_full_protocol_range() {
        // min 8, max 255 is the widest range a real server reports
        let snapshot = LayoutSnapshot::new(8, 255);
        assert_eq!(snapshot.len(), 248);
        assert_eq!(snapshot.keycodes().last(), Some(Keycode::from(255)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let snapshot = LayoutSnapshot::new(20, 10);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.keycodes().count(), 0);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(LayoutSnapshot::default().is_empty());
    }
}
