// Smilekeys Sequence Injector
// Emits one synthetic key press per resolved symbol, then flushes once

use log::{debug, warn};

use crate::mapping::KeyboardMappingIndex;
use crate::sequence::SequenceId;
use crate::session::{InputSession, SessionError};

/// Errors for a single injection call.
///
/// All of these are per-call: nothing here terminates the process, and no
/// retry is attempted.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("unknown sequence '{0}'")]
    UnknownSequence(String),

    #[error("no sequence registered under {0}")]
    UnknownId(SequenceId),

    #[error("no window currently holds input focus")]
    NoFocusTarget,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What one injection call actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectSummary {
    /// Key presses dispatched
    pub sent: usize,
    /// Symbols skipped because they had no key mapping at the last rebuild
    pub skipped: usize,
}

/// Types a resolved sequence into the focused window.
///
/// The injector borrows the session for one call; it holds no state of its
/// own and reads resolutions from the index without triggering any
/// resolution work.
pub struct SequenceInjector<'a, S: InputSession> {
    session: &'a mut S,
}

impl<'a, S: InputSession> SequenceInjector<'a, S> {
    pub fn new(session: &'a mut S) -> Self {
        Self { session }
    }

    /// Inject the sequence registered under `id`.
    ///
    /// The focus target is queried fresh on every call. Each resolved symbol
    /// becomes exactly one key-press event, dispatched in sequence order
    /// without waiting for acknowledgement; unresolved symbols are skipped
    /// with a warning. The outbound buffer is flushed exactly once after the
    /// whole sequence, regardless of its length. If no window holds the
    /// focus the call aborts before any event is sent.
    pub fn inject(
        &mut self,
        index: &KeyboardMappingIndex,
        id: SequenceId,
    ) -> Result<InjectSummary, InjectError> {
        let sequence = index
            .sequences()
            .get(id)
            .ok_or(InjectError::UnknownId(id))?;

        let target = self.session.input_focus()?;
        if target.is_none() {
            return Err(InjectError::NoFocusTarget);
        }

        let mut summary = InjectSummary::default();
        for (symbol, slot) in sequence.symbols().iter().zip(sequence.resolved()) {
            match slot {
                Some(action) => {
                    debug!("press {} for '{}' at {}", action, symbol, target);
                    self.session.send_key_press(target, *action)?;
                    summary.sent += 1;
                }
                None => {
                    warn!(
                        "'{}' in '{}' is unresolved; skipping",
                        symbol,
                        sequence.name()
                    );
                    summary.skipped += 1;
                }
            }
        }
        self.session.flush()?;

        Ok(summary)
    }
}
