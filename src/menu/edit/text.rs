//! Bounded text entry.
//!
//! The scratch buffer is owned by the edit itself rather than borrowed from a
//! shared pool: acquiring the buffer is starting the edit, releasing it is
//! dropping the edit. Abandoning an edit mid-way (navigating off the page,
//! cancelling with ESC) therefore cannot leak anything.

use heapless::Vec;

use super::Phase;
use crate::console::labels::{self, LabelId};
use crate::menu::input::{ASCII_BACKSPACE, ASCII_CR, ASCII_DEL};
use crate::menu::view::Screen;
use crate::menu::{CallerId, Error, Pos};

/// Capacity of the text scratch buffer; `max_len` may not exceed this.
pub const TEXT_CAPACITY: usize = 64;

/// An in-flight bounded text edit.
#[derive(Debug)]
pub struct TextEdit {
    buf: Vec<u8, TEXT_CAPACITY>,
    max_len: usize,
    cursor: usize,
    caller: CallerId,
    label: LabelId,
    pos: Pos,
    text_pos: Pos,
    /// Last cursor position actually rendered; starts at a sentinel so the
    /// first refresh always draws.
    last_drawn: usize,
    phase: Phase,
}

impl TextEdit {
    /// Start an edit at `pos`, bounded to `max_len` bytes, pre-filled with a
    /// right-trimmed copy of `initial`.
    pub(crate) fn new(
        pos: Pos,
        max_len: usize,
        caller: CallerId,
        label: LabelId,
        initial: &str,
    ) -> Result<Self, Error> {
        if max_len > TEXT_CAPACITY {
            return Err(Error::Overflow);
        }

        let trimmed = initial.trim_end_matches(' ');
        let mut buf = Vec::new();
        for &byte in trimmed.as_bytes().iter().take(max_len) {
            // Infallible: max_len <= TEXT_CAPACITY.
            let _ = buf.push(byte);
        }
        let cursor = buf.len();

        Ok(Self {
            buf,
            max_len,
            cursor,
            caller,
            label,
            pos,
            text_pos: Pos {
                row: pos.row + 1,
                col: pos.col + 2,
            },
            last_drawn: usize::MAX,
            phase: Phase::Editing,
        })
    }

    /// Apply one keystroke. ESC never reaches here; the input state machine
    /// intercepts it for disambiguation.
    pub(crate) fn feed(&mut self, byte: u8) {
        match byte {
            ASCII_CR => self.phase = Phase::Committed,
            ASCII_BACKSPACE | ASCII_DEL => {
                if self.cursor > 0 {
                    self.buf.remove(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            0x20..=0x7E => {
                if self.buf.len() < self.max_len {
                    // Infallible: max_len <= TEXT_CAPACITY.
                    let _ = self.buf.insert(self.cursor, byte);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    /// A lone ESC cancelled the edit.
    pub(crate) fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }

    /// Whether the edit has left the `Editing` phase.
    pub(crate) fn is_finished(&self) -> bool {
        self.phase != Phase::Editing
    }

    /// The committed text, if the edit committed.
    pub(crate) fn result(&self) -> Option<(CallerId, &[u8])> {
        if self.phase == Phase::Committed {
            Some((self.caller, self.buf.as_slice()))
        } else {
            None
        }
    }

    /// Draw the caption and input field and show the cursor.
    pub(crate) fn draw(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        screen.move_to(self.pos)?;
        screen.label(self.label, &[])?;
        screen.move_to(Pos {
            row: self.pos.row + 1,
            col: self.pos.col,
        })?;
        screen.put("> ")?;
        screen.control(labels::CURSOR_SHOW, &[])?;
        self.refresh(screen)
    }

    /// Redraw the text field, only when the cursor moved since the last
    /// redraw.
    pub(crate) fn refresh(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        if self.cursor == self.last_drawn {
            return Ok(());
        }

        screen.move_to(self.text_pos)?;
        if let Ok(text) = core::str::from_utf8(&self.buf) {
            screen.put(text)?;
        }
        // One trailing blank erases the character left behind by a deletion.
        screen.put(" ")?;
        screen.move_to(Pos {
            row: self.text_pos.row,
            col: self.text_pos.col + self.cursor as u8,
        })?;

        self.last_drawn = self.cursor;
        Ok(())
    }
}
