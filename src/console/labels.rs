//! Label tables and the positional template formatter.
//!
//! Every piece of text the engine renders is resolved through a [`Labels`]
//! table: menu captions, field templates, and the VT100 control sequences for
//! cursor movement, region clearing, and color. Keeping the strings behind a
//! numeric ID keeps the engine free of terminal-specific literals and lets the
//! embedding application localize or re-skin pages without touching engine
//! code.
//!
//! Templates use a printf-family positional convention: `%d`/`%u` for
//! integers, `%s` for strings, `%c` for single characters, `%%` for a literal
//! percent sign. The [`render_into`] formatter substitutes arguments in order.
//!
//! # Usage Examples
//!
//! ```rust
//! use heapless::String;
//! use libmenu::console::labels::{render_into, Arg, Labels, StaticLabels, Vt100, CURSOR_POS};
//!
//! static TABLE: StaticLabels = StaticLabels(&[(100, "Temperature: %d.%d C")]);
//! let labels = Vt100::new(&TABLE);
//!
//! let mut out: String<64> = String::new();
//! render_into(&mut out, labels.get(100).unwrap(), &[Arg::Int(23), Arg::Int(5)]);
//! assert_eq!(out.as_str(), "Temperature: 23.5 C");
//!
//! // Control sequences resolve through the same table.
//! let mut seq: String<16> = String::new();
//! render_into(&mut seq, labels.get(CURSOR_POS).unwrap(), &[Arg::Int(4), Arg::Int(10)]);
//! assert_eq!(seq.as_str(), "\x1b[4;10H");
//! ```

use core::fmt::Write;

use heapless::String;

/// Numeric identifier of a label or format template.
///
/// IDs below [`CONTROL_BASE`] belong to the embedding application; IDs at or
/// above it are reserved for the control sequences the engine itself needs.
pub type LabelId = u16;

/// First label ID reserved for engine control sequences.
pub const CONTROL_BASE: LabelId = 0xFF00;

/// Full terminal reset, sent once at session bootstrap.
pub const RESET_TERMINAL: LabelId = CONTROL_BASE;
/// Clear the whole page region and home the cursor.
pub const CLEAR_SCREEN: LabelId = CONTROL_BASE + 1;
/// Clear the current line.
pub const CLEAR_LINE: LabelId = CONTROL_BASE + 2;
/// Move the cursor; takes row and column arguments.
pub const CURSOR_POS: LabelId = CONTROL_BASE + 3;
/// Make the text cursor visible.
pub const CURSOR_SHOW: LabelId = CONTROL_BASE + 4;
/// Hide the text cursor.
pub const CURSOR_HIDE: LabelId = CONTROL_BASE + 5;
/// Save the current attribute and cursor state.
pub const ATTR_SAVE: LabelId = CONTROL_BASE + 6;
/// Restore the previously saved attribute and cursor state.
pub const ATTR_RESTORE: LabelId = CONTROL_BASE + 7;
/// Foreground color for an in-range edit value.
pub const COLOR_VALID: LabelId = CONTROL_BASE + 8;
/// Foreground color for an out-of-range edit value.
pub const COLOR_INVALID: LabelId = CONTROL_BASE + 9;
/// Return to the default color and attributes.
pub const COLOR_RESET: LabelId = CONTROL_BASE + 10;
/// Caption of the generated back/quit entry on selector `0`.
pub const BACK_CAPTION: LabelId = CONTROL_BASE + 11;
/// Optional banner printed once at session bootstrap, if the table has it.
pub const BANNER: LabelId = CONTROL_BASE + 12;

/// A table mapping label IDs to format templates.
///
/// Implementations only need `get`; the engine treats a `None` answer as
/// "render nothing" and carries on silently.
pub trait Labels {
    /// Look up the template for `id`.
    fn get(&self, id: LabelId) -> Option<&str>;
}

impl<T: Labels + ?Sized> Labels for &T {
    fn get(&self, id: LabelId) -> Option<&str> {
        (**self).get(id)
    }
}

/// A label table backed by a static slice of `(id, template)` pairs.
///
/// # Examples
///
/// ```rust
/// use libmenu::console::labels::{Labels, StaticLabels};
///
/// static TABLE: StaticLabels = StaticLabels(&[(1, "Main menu"), (2, "Uptime: %d s")]);
/// assert_eq!(TABLE.get(1), Some("Main menu"));
/// assert_eq!(TABLE.get(3), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticLabels(pub &'static [(LabelId, &'static str)]);

impl Labels for StaticLabels {
    fn get(&self, id: LabelId) -> Option<&str> {
        self.0
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, template)| *template)
    }
}

/// Decorator answering the reserved control IDs with standard VT100/ANSI
/// sequences and delegating everything else to the wrapped table.
///
/// Control IDs are resolved here before the inner table is consulted, so an
/// application entry cannot accidentally shadow the engine's cursor handling.
/// Applications that need different sequences implement [`Labels`] directly
/// instead of wrapping with `Vt100`.
#[derive(Debug, Clone, Copy)]
pub struct Vt100<L> {
    inner: L,
}

impl<L: Labels> Vt100<L> {
    /// Wrap an application label table with the default control sequences.
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: Labels> Labels for Vt100<L> {
    fn get(&self, id: LabelId) -> Option<&str> {
        match id {
            RESET_TERMINAL => Some("\x1bc"),
            CLEAR_SCREEN => Some("\x1b[2J\x1b[H"),
            CLEAR_LINE => Some("\x1b[2K"),
            CURSOR_POS => Some("\x1b[%d;%dH"),
            CURSOR_SHOW => Some("\x1b[?25h"),
            CURSOR_HIDE => Some("\x1b[?25l"),
            ATTR_SAVE => Some("\x1b7"),
            ATTR_RESTORE => Some("\x1b8"),
            COLOR_VALID => Some("\x1b[32m"),
            COLOR_INVALID => Some("\x1b[31m"),
            COLOR_RESET => Some("\x1b[0m"),
            BACK_CAPTION => Some("Back"),
            _ => self.inner.get(id),
        }
    }
}

/// A positional argument for [`render_into`].
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// Substituted for `%d` (or `%u` when non-negative).
    Int(i32),
    /// Substituted for `%s`.
    Str(&'a str),
    /// Substituted for `%c`.
    Char(char),
}

/// Render a printf-style template into a bounded string.
///
/// Arguments are consumed left to right. The formatter never fails: unknown
/// verbs are emitted literally, exhausted arguments leave the verb out, and a
/// full output buffer truncates the result. Failures stay invisible by
/// design; rendering is best-effort on a character-cell console.
pub fn render_into<const N: usize>(out: &mut String<N>, template: &str, args: &[Arg<'_>]) {
    let mut pending = args.iter();
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            if out.push(ch).is_err() {
                return;
            }
            continue;
        }

        match chars.next() {
            Some('%') => {
                if out.push('%').is_err() {
                    return;
                }
            }
            Some(verb @ ('d' | 'u' | 's' | 'c')) => {
                let Some(arg) = pending.next() else {
                    continue;
                };
                let full = match (verb, arg) {
                    ('d', Arg::Int(value)) => write!(out, "{}", value).is_err(),
                    ('u', Arg::Int(value)) => write!(out, "{}", *value as u32).is_err(),
                    ('s', Arg::Str(text)) => out.push_str(text).is_err(),
                    ('c', Arg::Char(c)) => out.push(*c).is_err(),
                    // Verb/argument mismatch renders the argument as-is.
                    (_, Arg::Int(value)) => write!(out, "{}", value).is_err(),
                    (_, Arg::Str(text)) => out.push_str(text).is_err(),
                    (_, Arg::Char(c)) => out.push(*c).is_err(),
                };
                if full {
                    return;
                }
            }
            Some(other) => {
                if out.push('%').is_err() || out.push(other).is_err() {
                    return;
                }
            }
            None => {
                let _ = out.push('%');
                return;
            }
        }
    }
}
