// Smilekeys Mapping Index
// Resolves symbols to key actions against the live keyboard layout

use log::{debug, warn};

use crate::action::KeyAction;
use crate::layout::LayoutSnapshot;
use crate::modifier::Level;
use crate::sequence::{SequenceId, SequenceRegistry, SymbolSequence};

/// Find a (keycode, modifier) pair that produces `symbol` under `snapshot`.
///
/// The scan visits level 0 across the whole keycode range, then level 1, and
/// every match overwrites the previous one. When a symbol is reachable
/// several ways the last match in scan order wins: the shifted form beats
/// the unshifted form, and among same-level matches the highest keycode
/// wins. This reproduces the historical full-scan behavior and is not a
/// preference policy.
pub fn resolve_symbol(snapshot: &LayoutSnapshot, symbol: char) -> Option<KeyAction> {
    let mut found = None;
    for level in Level::ALL {
        for keycode in snapshot.keycodes() {
            if snapshot.symbol(keycode, level) == Some(symbol) {
                found = Some(KeyAction::new(keycode, level.modifiers()));
            }
        }
    }
    found
}

/// Derived index from symbols to key actions, rebuilt in full on every
/// layout change.
///
/// The index exclusively owns the sequence registry; everything else reads
/// resolutions through [`lookup`](Self::lookup) or the registry accessors.
#[derive(Debug)]
pub struct KeyboardMappingIndex {
    sequences: SequenceRegistry,
}

impl KeyboardMappingIndex {
    pub fn new(sequences: SequenceRegistry) -> Self {
        Self { sequences }
    }

    /// Re-resolve every symbol of every registered sequence against
    /// `snapshot`.
    ///
    /// Each slot is overwritten with the freshly found action, or with
    /// `None` when the symbol has no mapping in this layout; a symbol that
    /// was reachable before a layout change does not keep its stale action.
    /// An empty snapshot leaves the index untouched so the previous
    /// resolutions stay serviceable.
    pub fn rebuild(&mut self, snapshot: &LayoutSnapshot) {
        if snapshot.is_empty() {
            warn!("layout snapshot is empty; keeping previous resolutions");
            return;
        }

        for sequence in self.sequences.iter_mut() {
            rebuild_sequence(sequence, snapshot);
        }
    }

    /// Resolved actions for a sequence, as of the last rebuild.
    ///
    /// No resolution work happens here; unresolved symbols read as `None`.
    pub fn lookup(&self, id: SequenceId) -> Option<&[Option<KeyAction>]> {
        self.sequences.get(id).map(SymbolSequence::resolved)
    }

    pub fn sequences(&self) -> &SequenceRegistry {
        &self.sequences
    }
}

fn rebuild_sequence(sequence: &mut SymbolSequence, snapshot: &LayoutSnapshot) {
    for index in 0..sequence.len() {
        let symbol = sequence.symbols()[index];
        let action = resolve_symbol(snapshot, symbol);
        match action {
            Some(action) => debug!(
                "'{}' in '{}' resolves to {}",
                symbol,
                sequence.name(),
                action
            ),
            None => warn!(
                "'{}' in '{}' has no key mapping in this layout",
                symbol,
                sequence.name()
            ),
        }
        sequence.resolved_mut()[index] = action;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Keycode;
    use crate::sequence::SymbolSequence;

    fn snapshot_with(entries: &[(u8, Level, char)]) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::new(8, 255);
        for &(keycode, level, symbol) in entries {
            snapshot.set_symbol(Keycode::from(keycode), level, symbol);
        }
        snapshot
    }

    fn registry_with(entries: &[(&str, &str)]) -> SequenceRegistry {
        let mut registry = SequenceRegistry::new();
        for &(name, text) in entries {
            registry
                .insert(SymbolSequence::new(name, text).unwrap())
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_resolve_symbol_levels() {
        let snapshot = snapshot_with(&[(38, Level::Base, ':'), (25, Level::Shifted, ')')]);

        assert_eq!(
            resolve_symbol(&snapshot, ':'),
            Some(KeyAction::plain(Keycode::from(38)))
        );
        assert_eq!(
            resolve_symbol(&snapshot, ')'),
            Some(KeyAction::shifted(Keycode::from(25)))
        );
        assert_eq!(resolve_symbol(&snapshot, 'z'), None);
    }

    #[test]
    fn test_resolve_symbol_last_position_wins() {
        // Two keycodes produce ':' at the same level; the higher one is
        // scanned later and wins.
        let snapshot = snapshot_with(&[(38, Level::Base, ':'), (60, Level::Base, ':')]);
        assert_eq!(
            resolve_symbol(&snapshot, ':'),
            Some(KeyAction::plain(Keycode::from(60)))
        );
    }

    #[test]
    fn test_resolve_symbol_shifted_level_wins() {
        // Level 1 is scanned after level 0, so the shifted form wins even on
        // a lower keycode.
        let snapshot = snapshot_with(&[(40, Level::Base, ':'), (30, Level::Shifted, ':')]);
        assert_eq!(
            resolve_symbol(&snapshot, ':'),
            Some(KeyAction::shifted(Keycode::from(30)))
        );
    }

    #[test]
    fn test_rebuild_populates_aligned_slots() {
        let snapshot = snapshot_with(&[(38, Level::Base, ':'), (25, Level::Shifted, ')')]);
        let mut index = KeyboardMappingIndex::new(registry_with(&[("smile", ":)")]));
        index.rebuild(&snapshot);

        let id = index.sequences().id_of("smile").unwrap();
        assert_eq!(
            index.lookup(id).unwrap(),
            &[
                Some(KeyAction::plain(Keycode::from(38))),
                Some(KeyAction::shifted(Keycode::from(25))),
            ]
        );
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let snapshot = snapshot_with(&[(38, Level::Base, ':'), (25, Level::Shifted, ')')]);
        let mut index = KeyboardMappingIndex::new(registry_with(&[("smile", ":)")]));

        index.rebuild(&snapshot);
        let id = index.sequences().id_of("smile").unwrap();
        let first: Vec<_> = index.lookup(id).unwrap().to_vec();

        index.rebuild(&snapshot);
        assert_eq!(index.lookup(id).unwrap(), first.as_slice());
    }

    #[test]
    fn test_rebuild_clears_stale_actions() {
        let mut index = KeyboardMappingIndex::new(registry_with(&[("smile", ":)")]));
        let id = index.sequences().id_of("smile").unwrap();

        index.rebuild(&snapshot_with(&[
            (38, Level::Base, ':'),
            (25, Level::Shifted, ')'),
        ]));
        assert!(index.sequences().get(id).unwrap().is_fully_resolved());

        // ':' disappears from the layout; its slot must not keep the old
        // keycode 38 action.
        index.rebuild(&snapshot_with(&[(25, Level::Shifted, ')')]));
        assert_eq!(
            index.lookup(id).unwrap(),
            &[None, Some(KeyAction::shifted(Keycode::from(25)))]
        );
    }

    #[test]
    fn test_rebuild_ignores_empty_snapshot() {
        let mut index = KeyboardMappingIndex::new(registry_with(&[("smile", ":)")]));
        let id = index.sequences().id_of("smile").unwrap();

        index.rebuild(&snapshot_with(&[
            (38, Level::Base, ':'),
            (25, Level::Shifted, ')'),
        ]));
        let before: Vec<_> = index.lookup(id).unwrap().to_vec();

        index.rebuild(&LayoutSnapshot::default());
        assert_eq!(index.lookup(id).unwrap(), before.as_slice());
    }

    #[test]
    fn test_rebuild_shared_symbol_across_sequences() {
        let snapshot = snapshot_with(&[
            (38, Level::Base, ':'),
            (25, Level::Shifted, ')'),
            (26, Level::Shifted, '('),
        ]);
        let mut index =
            KeyboardMappingIndex::new(registry_with(&[("smile", ":)"), ("frown", ":(")]));
        index.rebuild(&snapshot);

        let smile = index.sequences().id_of("smile").unwrap();
        let frown = index.sequences().id_of("frown").unwrap();
        assert_eq!(index.lookup(smile).unwrap()[0], index.lookup(frown).unwrap()[0]);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let index = KeyboardMappingIndex::new(SequenceRegistry::new());
        assert!(index.lookup(registry_with(&[("smile", ":)")]).id_of("smile").unwrap()).is_none());
    }
}
