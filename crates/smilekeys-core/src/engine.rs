// Smilekeys Engine
// Owns the mapping index and the session; wires lifecycle, layout
// notifications, and action dispatch together

use log::{debug, info};
use parking_lot::{Mutex, RwLock};

use crate::action::KeyAction;
use crate::inject::{InjectError, InjectSummary, SequenceInjector};
use crate::mapping::KeyboardMappingIndex;
use crate::sequence::{SequenceId, SequenceRegistry};
use crate::session::{InputSession, SessionError};

/// One invocable action the host can register: performing it injects the
/// named sequence, with the id as the opaque argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub name: String,
    pub sequence: SequenceId,
}

/// Ties the mapping index to a live session with explicit lifetime
/// boundaries.
///
/// The index sits behind a single-writer/multiple-reader lock: a rebuild
/// takes exclusive access, lookups during injection take shared access, so
/// no caller ever observes a half-rebuilt index. The session lock is never
/// held while waiting on the index lock.
pub struct SmileyEngine<S> {
    index: RwLock<KeyboardMappingIndex>,
    session: Mutex<S>,
}

impl<S: InputSession> SmileyEngine<S> {
    /// Build the engine from an already-validated registry and a connected
    /// session. No resolution happens until [`initialize`](Self::initialize)
    /// or [`mapping_changed`](Self::mapping_changed) runs.
    pub fn new(sequences: SequenceRegistry, session: S) -> Self {
        Self {
            index: RwLock::new(KeyboardMappingIndex::new(sequences)),
            session: Mutex::new(session),
        }
    }

    /// Explicit startup entry point: announce the bindings and perform the
    /// initial resolution pass against the current layout.
    pub fn initialize(&self) -> Result<(), SessionError> {
        {
            let index = self.index.read();
            info!("registering {} smiley bindings", index.sequences().len());
            for (id, sequence) in index.sequences().iter() {
                debug!("  {} {}: {}", id, sequence.name(), sequence.text());
            }
        }
        self.mapping_changed()
    }

    /// Handle a "keyboard mapping changed" notification: query a fresh
    /// layout snapshot, then rebuild the index under the write lock.
    ///
    /// A failed query leaves the index in its previous state.
    pub fn mapping_changed(&self) -> Result<(), SessionError> {
        let snapshot = self.session.lock().layout_snapshot()?;
        self.index.write().rebuild(&snapshot);
        Ok(())
    }

    /// Inject the sequence registered under `id` into the focused window
    pub fn send_sequence(&self, id: SequenceId) -> Result<InjectSummary, InjectError> {
        let index = self.index.read();
        let mut session = self.session.lock();
        SequenceInjector::new(&mut *session).inject(&index, id)
    }

    /// Inject the sequence registered under `name`
    pub fn send_named(&self, name: &str) -> Result<InjectSummary, InjectError> {
        let id = self
            .index
            .read()
            .sequences()
            .id_of(name)
            .ok_or_else(|| InjectError::UnknownSequence(name.to_string()))?;
        self.send_sequence(id)
    }

    /// Action-registry surface: one binding per sequence, registration order
    pub fn bindings(&self) -> Vec<ActionBinding> {
        self.index
            .read()
            .sequences()
            .iter()
            .map(|(id, sequence)| ActionBinding {
                name: sequence.name().to_string(),
                sequence: id,
            })
            .collect()
    }

    /// Resolved actions for a sequence as of the last rebuild, copied out
    /// from under the lock
    pub fn resolved_actions(&self, id: SequenceId) -> Option<Vec<Option<KeyAction>>> {
        self.index.read().lookup(id).map(<[_]>::to_vec)
    }

    /// Run `f` with mutable access to the session.
    ///
    /// Hosts use this for backend-specific calls such as blocking on the
    /// next layout-change notification.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.session.lock())
    }

    /// Explicit teardown counterpart to [`initialize`](Self::initialize);
    /// hands the session back to the host.
    pub fn shutdown(self) -> S {
        info!("shutting down smiley engine");
        self.session.into_inner()
    }
}
