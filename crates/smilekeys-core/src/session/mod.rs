// Smilekeys Session Layer
// Display-server access behind a trait seam

pub mod provider;

#[cfg(feature = "x11-backend")]
pub mod x11;

pub use provider::{InputSession, SessionError, WindowId};

#[cfg(feature = "x11-backend")]
pub use x11::X11Session;
