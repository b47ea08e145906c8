//! Common error types for engine operations

use super::MenuId;
use crate::console;

/// A common error type for menu engine operations.
///
/// Only structural failures surface here; invalid keystrokes, numeric
/// overflow during editing, and out-of-range commits are recovered silently
/// and never produce an error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The console transport failed.
    Console(console::Error),
    /// A navigation target does not exist in the menu tree.
    UnknownMenu(MenuId),
    /// An edit sub-mode is already live; only one edit may be in flight.
    Busy,
    /// A requested length exceeds the engine's fixed buffer capacity.
    Overflow,
}

impl From<console::Error> for Error {
    fn from(err: console::Error) -> Self {
        Error::Console(err)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Console(err) => defmt::write!(f, "Console({})", err),
            Error::UnknownMenu(id) => defmt::write!(f, "UnknownMenu({})", id.0),
            Error::Busy => defmt::write!(f, "Busy"),
            Error::Overflow => defmt::write!(f, "Overflow"),
        }
    }
}
