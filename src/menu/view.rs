//! The capability surface handed to page callbacks.
//!
//! A [`View`] is the only way a page touches the engine: it can render text
//! and labels, start a bounded edit, consume a finished edit, and maintain
//! the per-menu dirty bitmap. Pages never see the console or the session
//! directly, which keeps the one-edit-at-a-time ownership contract and the
//! display lock enforceable in one place.

use heapless::String;

use super::edit::{DecimalEdit, TextEdit};
use super::session::Session;
use super::{CallerId, Error, InputKind, Pos};
use crate::console::labels::{self, Arg, LabelId, Labels};
use crate::console::{self, Console};

/// Capacity of the scratch buffer a single label renders into.
const RENDER_CAPACITY: usize = 128;

/// Render target bundling the console, the label table, and the display
/// lock.
pub(crate) struct Screen<'a> {
    pub console: &'a mut dyn Console,
    pub labels: &'a dyn Labels,
    pub locked: bool,
}

impl Screen<'_> {
    /// Write raw text, honoring the display lock.
    pub fn put(&mut self, text: &str) -> Result<(), Error> {
        if self.locked {
            return Ok(());
        }
        let mut remaining = text.as_bytes();
        while !remaining.is_empty() {
            let written = self.console.write(remaining)?;
            if written == 0 {
                return Err(Error::Console(console::Error::WriteError));
            }
            remaining = &remaining[written..];
        }
        Ok(())
    }

    /// Render a label template with positional arguments and write it.
    ///
    /// A missing label renders nothing; rendering is best-effort by design.
    pub fn label(&mut self, id: LabelId, args: &[Arg<'_>]) -> Result<(), Error> {
        let Some(template) = self.labels.get(id) else {
            return Ok(());
        };
        let mut out: String<RENDER_CAPACITY> = String::new();
        labels::render_into(&mut out, template, args);
        self.put(out.as_str())
    }

    /// Write a reserved control sequence. Same mechanism as [`Self::label`];
    /// the separate name keeps call sites readable.
    pub fn control(&mut self, id: LabelId, args: &[Arg<'_>]) -> Result<(), Error> {
        self.label(id, args)
    }

    /// Move the cursor to a 1-based screen position.
    pub fn move_to(&mut self, pos: Pos) -> Result<(), Error> {
        self.control(
            labels::CURSOR_POS,
            &[Arg::Int(i32::from(pos.row)), Arg::Int(i32::from(pos.col))],
        )
    }

    /// Push queued output to the wire.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.locked {
            return Ok(());
        }
        self.console.flush()?;
        Ok(())
    }
}

/// What a page callback is allowed to do while handling an event.
pub struct View<'a> {
    pub(crate) screen: Screen<'a>,
    pub(crate) session: &'a mut Session,
    pub(crate) decimal: &'a mut Option<DecimalEdit>,
    pub(crate) text: &'a mut Option<TextEdit>,
}

impl core::fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("View")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl View<'_> {
    /// Write raw text at the current cursor position.
    pub fn print(&mut self, text: &str) -> Result<(), Error> {
        self.screen.put(text)
    }

    /// Write raw text at a screen position.
    pub fn print_at(&mut self, pos: Pos, text: &str) -> Result<(), Error> {
        self.screen.move_to(pos)?;
        self.screen.put(text)
    }

    /// Render a label with positional arguments at a screen position.
    ///
    /// # Examples
    ///
    /// Inside a page callback handling [`Event::Refresh`](super::Event):
    ///
    /// ```rust,ignore
    /// view.label_at(Pos { row: 5, col: 10 }, UPTIME_LABEL, &[Arg::Int(seconds)])?;
    /// ```
    pub fn label_at(&mut self, pos: Pos, id: LabelId, args: &[Arg<'_>]) -> Result<(), Error> {
        self.screen.move_to(pos)?;
        self.screen.label(id, args)
    }

    /// Direct access to the byte transport, for command-style pages that
    /// read auxiliary input such as quoted strings.
    pub fn console(&mut self) -> &mut dyn Console {
        &mut *self.screen.console
    }

    /// Whether rendering is currently suppressed.
    pub fn display_locked(&self) -> bool {
        self.session.display_locked
    }

    /// Set a bit of the per-menu dirty bitmap, typically to remember an
    /// unsaved change until the [`Flush`](super::Event::Flush) pass.
    pub fn mark_dirty(&mut self, bit: u8) {
        self.session.config_flags |= 1 << u32::from(bit);
    }

    /// Test a bit of the per-menu dirty bitmap.
    pub fn is_dirty(&self, bit: u8) -> bool {
        self.session.config_flags & (1 << u32::from(bit)) != 0
    }

    /// Start a bounded decimal edit and switch the session to decimal input.
    ///
    /// Draws the bordered range box at `pos` and shows the cursor. The page
    /// must return [`InputKind::Decimal`] from the invocation that called
    /// this, so the navigator arms the matching sub-mode.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] if another edit is already in flight.
    #[allow(clippy::too_many_arguments)]
    pub fn set_decimal_input(
        &mut self,
        pos: Pos,
        min: i32,
        max: i32,
        initial: i32,
        divider: u32,
        caller: CallerId,
        label: LabelId,
    ) -> Result<(), Error> {
        if self.decimal.is_some() || self.text.is_some() {
            return Err(Error::Busy);
        }
        let mut edit = DecimalEdit::new(pos, min, max, initial, divider, caller, label);
        edit.draw(&mut self.screen)?;
        *self.decimal = Some(edit);
        self.session.input_kind = InputKind::Decimal;
        Ok(())
    }

    /// Consume the result of a finished decimal edit.
    ///
    /// Returns `Some((caller, value))` exactly once, and only if the edit was
    /// committed with CR and the value lies within the configured bounds.
    /// Cancelled and out-of-range edits are discarded silently; the page
    /// keeps whatever value it had. Poll this once per `Init`/`RefreshOnce`
    /// pass.
    pub fn take_decimal(&mut self) -> Option<(CallerId, i32)> {
        if self.decimal.as_ref().is_some_and(DecimalEdit::is_finished) {
            let edit = self.decimal.take()?;
            edit.result()
        } else {
            None
        }
    }

    /// Start a bounded text edit and switch the session to text input.
    ///
    /// The initial text is copied right-trimmed; the cursor starts at the
    /// trimmed length. The page must return [`InputKind::Text`] from the
    /// invocation that called this.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] if another edit is already in flight,
    /// [`Error::Overflow`] if `max_len` exceeds the fixed buffer capacity.
    pub fn set_text_input(
        &mut self,
        pos: Pos,
        max_len: usize,
        caller: CallerId,
        label: LabelId,
        initial: &str,
    ) -> Result<(), Error> {
        if self.decimal.is_some() || self.text.is_some() {
            return Err(Error::Busy);
        }
        let mut edit = TextEdit::new(pos, max_len, caller, label, initial)?;
        edit.draw(&mut self.screen)?;
        *self.text = Some(edit);
        self.session.input_kind = InputKind::Text;
        Ok(())
    }

    /// Consume the result of a finished text edit.
    ///
    /// On success copies the committed text into `out` (truncating to its
    /// length) and returns the caller ID with the copied length. Symmetric to
    /// [`Self::take_decimal`]: the result is yielded exactly once.
    pub fn take_text(&mut self, out: &mut [u8]) -> Option<(CallerId, usize)> {
        if self.text.as_ref().is_some_and(TextEdit::is_finished) {
            let edit = self.text.take()?;
            let (caller, content) = edit.result()?;
            let len = content.len().min(out.len());
            out[..len].copy_from_slice(&content[..len]);
            Some((caller, len))
        } else {
            None
        }
    }
}
