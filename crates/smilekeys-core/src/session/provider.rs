// Input Session Provider Trait
//
// This module defines the interface the engine uses to talk to the
// windowing session: layout queries, focus queries, and synthetic
// key-press dispatch.

use std::fmt;

use crate::action::KeyAction;
use crate::layout::LayoutSnapshot;

/// Error type for session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("connection to display server failed: {0}")]
    ConnectionFailed(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("event dispatch failed: {0}")]
    SendFailed(String),
}

/// Identifier of a window on the session.
///
/// The protocol reserves id 0 for "no window"; a focus query can return it
/// when nothing holds the input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

impl WindowId {
    pub const NONE: WindowId = WindowId(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// True when this is the reserved "no window" id
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window 0x{:x}", self.0)
    }
}

/// Access to the windowing session.
///
/// Implementations wrap one live display-server connection. The engine only
/// ever drives a session from one place at a time, so methods take
/// `&mut self`; dispatch is fire-and-forget and buffered until
/// [`flush`](Self::flush).
pub trait InputSession {
    /// Query the full current keyboard layout.
    ///
    /// Called freshly on every layout-change notification; the engine never
    /// caches snapshots across notifications.
    fn layout_snapshot(&mut self) -> Result<LayoutSnapshot, SessionError>;

    /// Query which window currently holds the input focus.
    ///
    /// Returns [`WindowId::NONE`] when no window does.
    fn input_focus(&mut self) -> Result<WindowId, SessionError>;

    /// Queue one synthetic key-press event for `target`.
    ///
    /// No acknowledgement is awaited; the event may sit in the outbound
    /// buffer until the next flush.
    fn send_key_press(&mut self, target: WindowId, action: KeyAction) -> Result<(), SessionError>;

    /// Flush the outbound event buffer
    fn flush(&mut self) -> Result<(), SessionError>;
}
