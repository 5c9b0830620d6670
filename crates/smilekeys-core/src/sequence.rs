// Smilekeys Sequence Registry
// Named smiley sequences and their resolved key actions

use std::fmt;

use indexmap::IndexMap;

use crate::action::KeyAction;

/// Longest accepted sequence name, in characters
pub const MAX_NAME_LEN: usize = 31;

/// Longest accepted symbol sequence, in characters
pub const MAX_SEQUENCE_LEN: usize = 31;

/// Opaque handle for a registered sequence.
///
/// This is the integer argument handed to the host's action registry: dense,
/// stable, and assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(usize);

impl SequenceId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validation failures when building sequences from configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("sequence name is empty")]
    EmptyName,

    #[error("sequence name '{0}' exceeds {MAX_NAME_LEN} characters")]
    NameTooLong(String),

    #[error("sequence '{0}' has no symbols")]
    EmptySequence(String),

    #[error("sequence '{0}' exceeds {MAX_SEQUENCE_LEN} symbols")]
    SequenceTooLong(String),

    #[error("duplicate sequence name '{0}'")]
    DuplicateName(String),
}

/// A named, ordered sequence of symbols together with the key actions that
/// reproduce them under the last-seen keyboard layout.
///
/// `resolved` always has the same length as `symbols`; entry `i` holds the
/// action for symbol `i`, or `None` while that symbol has no mapping.
#[derive(Debug, Clone)]
pub struct SymbolSequence {
    name: String,
    symbols: Vec<char>,
    resolved: Vec<Option<KeyAction>>,
}

impl SymbolSequence {
    /// Build a sequence from its configured name and text, validating the
    /// length limits at this boundary.
    pub fn new(name: impl Into<String>, text: &str) -> Result<Self, SequenceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SequenceError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SequenceError::NameTooLong(name));
        }
        let symbols: Vec<char> = text.chars().collect();
        if symbols.is_empty() {
            return Err(SequenceError::EmptySequence(name));
        }
        if symbols.len() > MAX_SEQUENCE_LEN {
            return Err(SequenceError::SequenceTooLong(name));
        }
        let resolved = vec![None; symbols.len()];
        Ok(Self {
            name,
            symbols,
            resolved,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The typed text, reassembled from the symbols
    pub fn text(&self) -> String {
        self.symbols.iter().collect()
    }

    /// Number of symbols (and of resolved slots)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Key actions from the last rebuild, index-aligned with `symbols`
    pub fn resolved(&self) -> &[Option<KeyAction>] {
        &self.resolved
    }

    /// True when every symbol currently has a key action
    pub fn is_fully_resolved(&self) -> bool {
        self.resolved.iter().all(Option::is_some)
    }

    pub(crate) fn resolved_mut(&mut self) -> &mut [Option<KeyAction>] {
        &mut self.resolved
    }
}

/// Append-only, insertion-ordered collection of sequences.
///
/// Sequences are registered once at startup and addressed either by
/// [`SequenceId`] (registration order) or by name; nothing is removed at
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    sequences: IndexMap<String, SymbolSequence>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence, returning its id. Names must be unique.
    pub fn insert(&mut self, sequence: SymbolSequence) -> Result<SequenceId, SequenceError> {
        if self.sequences.contains_key(sequence.name()) {
            return Err(SequenceError::DuplicateName(sequence.name().to_string()));
        }
        let id = SequenceId(self.sequences.len());
        self.sequences.insert(sequence.name().to_string(), sequence);
        Ok(id)
    }

    pub fn get(&self, id: SequenceId) -> Option<&SymbolSequence> {
        self.sequences.get_index(id.0).map(|(_, seq)| seq)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SymbolSequence> {
        self.sequences.get(name)
    }

    pub fn id_of(&self, name: &str) -> Option<SequenceId> {
        self.sequences.get_index_of(name).map(SequenceId)
    }

    /// All sequences in registration order
    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, &SymbolSequence)> {
        self.sequences
            .values()
            .enumerate()
            .map(|(index, seq)| (SequenceId(index), seq))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SymbolSequence> {
        self.sequences.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_construction() {
        let seq = SymbolSequence::new("smile", ":)").unwrap();
        assert_eq!(seq.name(), "smile");
        assert_eq!(seq.symbols(), &[':', ')']);
        assert_eq!(seq.text(), ":)");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.resolved().len(), 2);
        assert!(!seq.is_fully_resolved());
    }

    #[test]
    fn test_sequence_validation() {
        assert_eq!(
            SymbolSequence::new("", ":)").unwrap_err(),
            SequenceError::EmptyName
        );
        assert_eq!(
            SymbolSequence::new("smile", "").unwrap_err(),
            SequenceError::EmptySequence("smile".to_string())
        );

        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            SymbolSequence::new(long_name, ":)"),
            Err(SequenceError::NameTooLong(_))
        ));

        let long_text = ")".repeat(MAX_SEQUENCE_LEN + 1);
        assert!(matches!(
            SymbolSequence::new("smile", &long_text),
            Err(SequenceError::SequenceTooLong(_))
        ));
    }

    #[test]
    fn test_sequence_limits_are_inclusive() {
        let name = "x".repeat(MAX_NAME_LEN);
        let text = ")".repeat(MAX_SEQUENCE_LEN);
        assert!(SymbolSequence::new(name, &text).is_ok());
    }

    #[test]
    fn test_registry_ids_follow_insertion_order() {
        let mut registry = SequenceRegistry::new();
        let smile = registry
            .insert(SymbolSequence::new("smile", ":)").unwrap())
            .unwrap();
        let wink = registry
            .insert(SymbolSequence::new("wink", ";)").unwrap())
            .unwrap();

        assert_eq!(smile.index(), 0);
        assert_eq!(wink.index(), 1);
        assert_eq!(registry.get(smile).unwrap().name(), "smile");
        assert_eq!(registry.id_of("wink"), Some(wink));

        let names: Vec<_> = registry.iter().map(|(_, seq)| seq.name()).collect();
        assert_eq!(names, vec!["smile", "wink"]);
    }

    #[test]
    fn test_registry_rejects_duplicate_names() {
        let mut registry = SequenceRegistry::new();
        registry
            .insert(SymbolSequence::new("smile", ":)").unwrap())
            .unwrap();
        assert_eq!(
            registry
                .insert(SymbolSequence::new("smile", ":D").unwrap())
                .unwrap_err(),
            SequenceError::DuplicateName("smile".to_string())
        );
    }

    #[test]
    fn test_registry_unknown_lookups() {
        let registry = SequenceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_by_name("smile").is_none());
        assert!(registry.id_of("smile").is_none());
        assert!(registry.get(SequenceId(0)).is_none());
    }
}
