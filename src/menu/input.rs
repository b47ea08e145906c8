//! Byte classification for the active input sub-mode.
//!
//! The state machine consumes at most one byte per tick and never blocks.
//! Every byte passes the same three gates before sub-mode dispatch: a pending
//! flush (the tail of a degraded escape sequence), an ESC intercept (arming
//! the disambiguation timer), and an in-escape follow-up (degrading the whole
//! sequence). Only then is the byte interpreted against the active
//! [`InputKind`](super::InputKind).
//!
//! Invalid bytes are recovered silently: the pending selection is reset and
//! no error is surfaced anywhere, because on a character-cell console the
//! user's feedback is simply that nothing happened.

use super::edit::{DecimalEdit, TextEdit};
use super::escape::EscapeTimer;
use super::session::Session;
use super::InputKind;

// ASCII control character constants for input processing
/// ASCII escape character (0x1B).
pub const ASCII_ESC: u8 = 0x1B;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII delete character (0x7F); treated as backspace by the editors.
pub const ASCII_DEL: u8 = 0x7F;

/// Reserved selection value meaning "the user pressed a lone ESC".
///
/// Deliberately outside the selector range (`0`-`9` map to 0-9, letters to
/// 10-35), so no menu item can collide with it. The navigator resolves it to
/// item 0, the back/quit binding.
pub const CHOICE_ESCAPE: u8 = 0xFF;

/// Map a byte to a menu selection value.
///
/// Digits `'0'`-`'9'` map to 0-9 (0 is the generated back/quit selector),
/// letters map to 10 and up case-insensitively, ESC maps to
/// [`CHOICE_ESCAPE`]. Anything else is not a selector.
///
/// # Examples
///
/// ```rust
/// use libmenu::menu::input::{classify_choice, CHOICE_ESCAPE};
///
/// assert_eq!(classify_choice(b'1'), Some(1));
/// assert_eq!(classify_choice(b'0'), Some(0));
/// assert_eq!(classify_choice(b'a'), Some(10));
/// assert_eq!(classify_choice(b'Z'), Some(35));
/// assert_eq!(classify_choice(0x1B), Some(CHOICE_ESCAPE));
/// assert_eq!(classify_choice(b' '), None);
/// ```
pub fn classify_choice(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'z' => Some(byte - b'a' + 10),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        ASCII_ESC => Some(CHOICE_ESCAPE),
        _ => None,
    }
}

/// One tick's worth of mutable borrows over the input-facing engine parts.
pub(crate) struct Machine<'a> {
    pub session: &'a mut Session,
    pub escape: &'a mut EscapeTimer,
    pub decimal: &'a mut Option<DecimalEdit>,
    pub text: &'a mut Option<TextEdit>,
}

impl Machine<'_> {
    /// Run one byte through the state machine.
    pub(crate) fn consume(&mut self, byte: u8) {
        // Gate 1: swallow the trailing byte of a degraded escape sequence.
        if self.session.flush_next_byte {
            self.session.flush_next_byte = false;
            return;
        }

        // Gate 2: ESC starts disambiguation. The decimal accumulator is
        // snapshotted so a degraded sequence can put it back.
        if byte == ASCII_ESC {
            self.escape.arm();
            if let Some(edit) = self.decimal.as_mut() {
                edit.take_snapshot();
            }
            self.session.in_escape = true;
            return;
        }

        // Gate 3: a byte followed ESC inside the window, so the whole run is
        // a terminal control sequence. Assume the common 3-byte VT100 form:
        // this byte is consumed here, the next tick swallows the remainder.
        if self.session.in_escape {
            self.escape.cancel();
            self.session.reject_input();
            self.session.flush_next_byte = true;
            if let Some(edit) = self.decimal.as_mut() {
                edit.restore_snapshot();
            }
            self.session.in_escape = false;
            return;
        }

        match self.session.input_kind {
            InputKind::Choice => match classify_choice(byte) {
                Some(value) => {
                    self.session.input = value;
                    self.session.validate_input = true;
                }
                None => self.session.reject_input(),
            },
            InputKind::Decimal => {
                if let Some(edit) = self.decimal.as_mut() {
                    edit.feed(byte);
                    if edit.is_finished() {
                        // CR committed; control returns to the menu.
                        self.session.input_kind = InputKind::Choice;
                    }
                }
            }
            InputKind::Text => {
                if let Some(edit) = self.text.as_mut() {
                    edit.feed(byte);
                    if edit.is_finished() {
                        self.session.input_kind = InputKind::Choice;
                    }
                }
            }
            InputKind::EscapeOnly => {
                // Only ESC has effect, and it was intercepted at gate 2.
            }
        }
    }
}
