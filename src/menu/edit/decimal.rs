//! Bounded numeric entry with fixed-point display.
//!
//! The editor keeps a signed accumulator the user builds digit by digit.
//! Digits shift the accumulator left, backspace shifts it right, `-` and `+`
//! toggle the sign in the direction matching the symbol, CR commits and ESC
//! cancels. A fixed-point divider (10, 100, or 1000) only affects rendering:
//! the accumulator always holds the scaled integer, so a divider of 100 and
//! an accumulator of 2350 display as `23.50`.
//!
//! Range checking happens at consume time, not per keystroke: the user may
//! type through an out-of-range intermediate value, but a commit outside
//! `[min, max]` yields no result and the owning page keeps its stale value.

use core::fmt::Write;

use heapless::String;

use super::Phase;
use crate::menu::input::{ASCII_BACKSPACE, ASCII_CR, ASCII_DEL};
use crate::menu::view::Screen;
use crate::menu::{CallerId, Error, Pos};
use crate::console::labels::{self, LabelId};

/// Largest magnitude the accumulator may reach through digit entry.
///
/// A keystroke that would push `abs(value * 10) + digit` past this cap is
/// dropped silently and editing continues.
pub const ACCUMULATOR_LIMIT: i64 = 100_000_000;

/// Total width of the rendered entry box, borders included.
const BOX_WIDTH: usize = 32;

/// Width of the value field inside the box.
const FIELD_WIDTH: usize = BOX_WIDTH - 6;

/// An in-flight bounded numeric edit.
#[derive(Debug)]
pub struct DecimalEdit {
    min: i32,
    max: i32,
    value: i32,
    /// Accumulator as it stood when ESC arrived, restored if the ESC turns
    /// out to be the start of a control sequence.
    snapshot: i32,
    divider: u32,
    caller: CallerId,
    label: LabelId,
    pos: Pos,
    value_pos: Pos,
    /// Last value actually rendered; starts at an impossible sentinel so the
    /// first refresh always draws.
    last_drawn: i64,
    phase: Phase,
}

impl DecimalEdit {
    /// Start an edit at `pos` over `[min, max]` with the given initial value.
    ///
    /// Dividers other than 10, 100, or 1000 fall back to plain integer
    /// display.
    pub(crate) fn new(
        pos: Pos,
        min: i32,
        max: i32,
        initial: i32,
        divider: u32,
        caller: CallerId,
        label: LabelId,
    ) -> Self {
        let divider = match divider {
            10 | 100 | 1000 => divider,
            _ => 1,
        };
        Self {
            min,
            max,
            value: initial,
            snapshot: initial,
            divider,
            caller,
            label,
            pos,
            value_pos: Pos {
                row: pos.row + 3,
                col: pos.col + 4,
            },
            last_drawn: i64::MIN,
            phase: Phase::Editing,
        }
    }

    /// Apply one keystroke. ESC never reaches here; the input state machine
    /// intercepts it for disambiguation.
    pub(crate) fn feed(&mut self, byte: u8) {
        match byte {
            ASCII_CR => self.phase = Phase::Committed,
            ASCII_BACKSPACE | ASCII_DEL => self.value /= 10,
            b'-' if self.value >= 0 => self.value = -self.value,
            b'+' if self.value < 0 => self.value = -self.value,
            b'0'..=b'9' => {
                let digit = i64::from(byte - b'0');
                let shifted = i64::from(self.value) * 10;
                if shifted.abs() + digit <= ACCUMULATOR_LIMIT {
                    let signed = if self.value < 0 { -digit } else { digit };
                    self.value = (shifted + signed) as i32;
                }
            }
            _ => {}
        }
    }

    /// Remember the accumulator before escape disambiguation.
    pub(crate) fn take_snapshot(&mut self) {
        self.snapshot = self.value;
    }

    /// The ESC belonged to a control sequence; put the accumulator back.
    pub(crate) fn restore_snapshot(&mut self) {
        self.value = self.snapshot;
    }

    /// A lone ESC cancelled the edit.
    pub(crate) fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }

    /// Whether the edit has left the `Editing` phase.
    pub(crate) fn is_finished(&self) -> bool {
        self.phase != Phase::Editing
    }

    /// The committed result, if the edit committed inside `[min, max]`.
    pub(crate) fn result(&self) -> Option<(CallerId, i32)> {
        if self.phase == Phase::Committed && self.value >= self.min && self.value <= self.max {
            Some((self.caller, self.value))
        } else {
            None
        }
    }

    /// Draw the bordered entry box and show the cursor.
    pub(crate) fn draw(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        let mut line: String<BOX_WIDTH> = String::new();

        line.clear();
        let _ = line.push('+');
        while line.len() < BOX_WIDTH - 1 {
            let _ = line.push('-');
        }
        let _ = line.push('+');
        screen.move_to(self.pos)?;
        screen.put(line.as_str())?;

        line.clear();
        let _ = line.push_str("| ");
        if let Some(caption) = screen.labels.get(self.label) {
            let mut rendered: String<BOX_WIDTH> = String::new();
            labels::render_into(&mut rendered, caption, &[]);
            for ch in rendered.chars() {
                if line.len() >= BOX_WIDTH - 2 {
                    break;
                }
                let _ = line.push(ch);
            }
        }
        Self::pad_and_close(&mut line);
        screen.move_to(Pos {
            row: self.pos.row + 1,
            col: self.pos.col,
        })?;
        screen.put(line.as_str())?;

        line.clear();
        let _ = line.push_str("| [");
        Self::push_scaled(&mut line, self.min, self.divider);
        let _ = line.push_str(" .. ");
        Self::push_scaled(&mut line, self.max, self.divider);
        let _ = line.push(']');
        Self::pad_and_close(&mut line);
        screen.move_to(Pos {
            row: self.pos.row + 2,
            col: self.pos.col,
        })?;
        screen.put(line.as_str())?;

        screen.move_to(Pos {
            row: self.pos.row + 3,
            col: self.pos.col,
        })?;
        screen.put("| >")?;

        line.clear();
        let _ = line.push('+');
        while line.len() < BOX_WIDTH - 1 {
            let _ = line.push('-');
        }
        let _ = line.push('+');
        screen.move_to(Pos {
            row: self.pos.row + 4,
            col: self.pos.col,
        })?;
        screen.put(line.as_str())?;

        screen.control(labels::CURSOR_SHOW, &[])?;
        self.refresh(screen)
    }

    /// Redraw the value field, only when the accumulator changed since the
    /// last redraw. Colors the value against `[min, max]` when the color
    /// labels are available.
    pub(crate) fn refresh(&mut self, screen: &mut Screen<'_>) -> Result<(), Error> {
        if i64::from(self.value) == self.last_drawn {
            return Ok(());
        }

        let mut field: String<FIELD_WIDTH> = String::new();
        Self::push_scaled(&mut field, self.value, self.divider);

        let mut blank: String<FIELD_WIDTH> = String::new();
        while blank.push(' ').is_ok() {}

        screen.move_to(self.value_pos)?;
        screen.put(blank.as_str())?;
        screen.move_to(self.value_pos)?;

        let in_range = self.value >= self.min && self.value <= self.max;
        let color = if in_range {
            labels::COLOR_VALID
        } else {
            labels::COLOR_INVALID
        };
        screen.control(color, &[])?;
        screen.put(field.as_str())?;
        screen.control(labels::COLOR_RESET, &[])?;

        self.last_drawn = i64::from(self.value);
        Ok(())
    }

    fn pad_and_close<const N: usize>(line: &mut String<N>) {
        while line.len() < N - 1 {
            let _ = line.push(' ');
        }
        let _ = line.push('|');
    }

    /// Render `value` as `integer.fraction` for dividers 10/100/1000, plain
    /// otherwise.
    fn push_scaled<const N: usize>(out: &mut String<N>, value: i32, divider: u32) {
        if divider <= 1 {
            let _ = write!(out, "{}", value);
            return;
        }
        let scaled = i64::from(value);
        let div = i64::from(divider);
        let sign = if scaled < 0 { "-" } else { "" };
        let int = (scaled / div).abs();
        let frac = (scaled % div).abs();
        let width = match divider {
            10 => 1,
            100 => 2,
            _ => 3,
        };
        let _ = write!(out, "{}{}.{:0width$}", sign, int, frac, width = width);
    }
}
