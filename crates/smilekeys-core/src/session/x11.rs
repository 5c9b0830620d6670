// X11 Input Session
// Live layout queries and synthetic key-press dispatch over x11rb

use log::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    ConnectionExt, EventMask, KeyButMask, KeyPressEvent, Mapping, Window, KEY_PRESS_EVENT,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

use crate::action::KeyAction;
use crate::key::Keycode;
use crate::layout::LayoutSnapshot;
use crate::modifier::Level;
use crate::session::{InputSession, SessionError, WindowId};

// Unicode keysyms are the codepoint offset by this base; keysyms below
// 0x100 are Latin-1.
const UNICODE_KEYSYM_BASE: u32 = 0x0100_0000;
const NO_SYMBOL: u32 = 0;

fn keysym_to_char(keysym: u32) -> Option<char> {
    match keysym {
        0x20..=0x7e | 0xa0..=0xff => char::from_u32(keysym),
        UNICODE_KEYSYM_BASE..=0x0110_ffff => char::from_u32(keysym - UNICODE_KEYSYM_BASE),
        _ => None,
    }
}

/// An X11 connection acting as the engine's input session.
///
/// Layout snapshots come from `GetKeyboardMapping`, the focus target from
/// `GetInputFocus`, and injection uses `SendEvent` with a key-press event,
/// exactly one flush per injected sequence.
pub struct X11Session {
    conn: RustConnection,
    root: Window,
}

impl X11Session {
    /// Connect to the display named by `$DISPLAY`
    pub fn connect() -> Result<Self, SessionError> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|e| SessionError::ConnectionFailed(e.to_string()))?;
        let root = conn.setup().roots[screen_num].root;
        debug!("connected to X11, root window 0x{:x}", root);
        Ok(Self { conn, root })
    }

    /// Block until the server reports a keyboard mapping change.
    ///
    /// Mapping notifications are delivered to every client, so no event
    /// mask needs to be selected. Non-keyboard mapping changes (pointer
    /// buttons, modifier table) are ignored.
    pub fn wait_mapping_changed(&mut self) -> Result<(), SessionError> {
        loop {
            let event = self
                .conn
                .wait_for_event()
                .map_err(|e| SessionError::QueryFailed(e.to_string()))?;
            if let Event::MappingNotify(notify) = event {
                if notify.request == Mapping::KEYBOARD {
                    debug!("keyboard mapping changed");
                    return Ok(());
                }
            }
        }
    }
}

impl InputSession for X11Session {
    fn layout_snapshot(&mut self) -> Result<LayoutSnapshot, SessionError> {
        let setup = self.conn.setup();
        let min_keycode = setup.min_keycode;
        let max_keycode = setup.max_keycode;
        let count = (u16::from(max_keycode) - u16::from(min_keycode) + 1) as u8;

        let reply = self
            .conn
            .get_keyboard_mapping(min_keycode, count)
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?
            .reply()
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?;

        let per_keycode = usize::from(reply.keysyms_per_keycode);
        if per_keycode == 0 {
            warn!("server reported zero keysyms per keycode");
            return Ok(LayoutSnapshot::default());
        }

        let mut snapshot = LayoutSnapshot::new(min_keycode, max_keycode);
        for (offset, keysyms) in reply.keysyms.chunks(per_keycode).enumerate() {
            let keycode = Keycode::from(min_keycode + offset as u8);
            for level in Level::ALL {
                let keysym = keysyms.get(level.index()).copied().unwrap_or(NO_SYMBOL);
                if keysym == NO_SYMBOL {
                    continue;
                }
                if let Some(symbol) = keysym_to_char(keysym) {
                    snapshot.set_symbol(keycode, level, symbol);
                }
            }
        }
        Ok(snapshot)
    }

    fn input_focus(&mut self) -> Result<WindowId, SessionError> {
        let reply = self
            .conn
            .get_input_focus()
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?
            .reply()
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?;
        Ok(WindowId::new(reply.focus))
    }

    fn send_key_press(&mut self, target: WindowId, action: KeyAction) -> Result<(), SessionError> {
        let event = KeyPressEvent {
            response_type: KEY_PRESS_EVENT,
            detail: action.keycode.value(),
            sequence: 0,
            time: x11rb::CURRENT_TIME,
            root: self.root,
            event: target.value(),
            child: x11rb::NONE,
            root_x: 0,
            root_y: 0,
            event_x: 0,
            event_y: 0,
            state: KeyButMask::from(action.modifiers.bits()),
            same_screen: true,
        };
        self.conn
            .send_event(false, target.value(), EventMask::KEY_PRESS, event)
            .map_err(|e| SessionError::SendFailed(e.to_string()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SessionError> {
        self.conn
            .flush()
            .map_err(|e| SessionError::SendFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keysym_to_char_latin1() {
        assert_eq!(keysym_to_char(0x3a), Some(':'));
        assert_eq!(keysym_to_char(0x29), Some(')'));
        assert_eq!(keysym_to_char(0xe9), Some('é'));
    }

    #[test]
    fn test_keysym_to_char_unicode() {
        // U+263A WHITE SMILING FACE as a Unicode keysym
        assert_eq!(keysym_to_char(UNICODE_KEYSYM_BASE + 0x263a), Some('☺'));
    }

    #[test]
    fn test_keysym_to_char_non_characters() {
        assert_eq!(keysym_to_char(NO_SYMBOL), None);
        assert_eq!(keysym_to_char(0xff0d), None); // Return keysym
        assert_eq!(keysym_to_char(0xffe1), None); // Shift_L keysym
    }
}
