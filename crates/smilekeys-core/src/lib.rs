// Smilekeys Core Library
// Keyboard mapping resolution and synthetic key-press injection

pub mod action;
pub mod config;
pub mod engine;
pub mod inject;
pub mod key;
pub mod layout;
pub mod mapping;
pub mod modifier;
pub mod sequence;
pub mod session;

pub use action::KeyAction;
pub use config::{default_config_content, Config, ConfigError};
pub use engine::{ActionBinding, SmileyEngine};
pub use inject::{InjectError, InjectSummary, SequenceInjector};
pub use key::Keycode;
pub use layout::LayoutSnapshot;
pub use mapping::{resolve_symbol, KeyboardMappingIndex};
pub use modifier::{Level, Modifiers};
pub use sequence::{
    SequenceError, SequenceId, SequenceRegistry, SymbolSequence, MAX_NAME_LEN, MAX_SEQUENCE_LEN,
};
pub use session::{InputSession, SessionError, WindowId};

#[cfg(feature = "x11-backend")]
pub use session::X11Session;
