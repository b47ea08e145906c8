//! Bounded decimal and text editing sub-modes.
//!
//! An edit is started by a page callback (through
//! [`View::set_decimal_input`](super::View::set_decimal_input) or
//! [`View::set_text_input`](super::View::set_text_input)) and lives until the
//! owning page consumes the result, the user cancels with ESC, or navigation
//! leaves the page. Exactly one edit may be in flight at a time, matching the
//! single active input sub-mode.
//!
//! Results hand over through a consume-once protocol: the first
//! `take_*` call after a carriage-return commit yields the value, every call
//! after that yields nothing until a new edit starts. Cancelled and
//! out-of-range edits yield nothing at all, so the owning page silently keeps
//! its stale value.

/// Bounded numeric entry with fixed-point display
pub mod decimal;

/// Bounded text entry
pub mod text;

pub use decimal::DecimalEdit;
pub use text::TextEdit;

/// Where an edit stands in its lifecycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Phase {
    /// Accepting keystrokes.
    Editing,
    /// Committed with CR; the result is waiting to be consumed.
    Committed,
    /// Cancelled with ESC; there is no result.
    Cancelled,
}
