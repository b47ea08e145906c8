//! Common error types for console operations

/// A common error type for console transport operations.
///
/// This enum defines a set of common errors that can occur when moving bytes
/// to and from a serial or virtual console. It is designed to be simple and
/// portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An error occurred during a read operation.
    ReadError,
    /// An error occurred during a write operation.
    WriteError,
    /// A buffer was too small for the data it had to hold.
    Overflow,
    /// The requested data has not arrived yet.
    NotReady,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::Overflow => defmt::write!(f, "Overflow"),
            Error::NotReady => defmt::write!(f, "NotReady"),
        }
    }
}
