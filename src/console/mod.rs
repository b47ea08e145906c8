//! A console abstraction layer for embedded systems
//!
//! This module defines the boundary between the menu engine and whatever
//! physical or virtual transport carries console bytes: a UART, a telnet
//! bridge, a USB CDC endpoint, or a test mock. The engine never assumes any
//! framing beyond single bytes; the only convention carried here beyond that
//! is the quoted-string helper used by auxiliary command input.
//!
//! # Design Philosophy
//!
//! - **Non-blocking**: every operation returns immediately; the engine is
//!   driven from a periodic scheduler tick and must never stall it
//! - **Object safe**: the trait uses the concrete [`Error`] type so page
//!   callbacks can be handed a `&mut dyn Console` without generic plumbing
//! - **Embedded-first**: no allocation, no `std`, fixed-size buffers only
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use libmenu::console::{Console, Error};
//!
//! fn drain<C: Console>(console: &mut C) -> Result<usize, Error> {
//!     let mut total = 0;
//!     let mut byte = [0u8; 1];
//!     while console.ready_read() {
//!         total += console.read(&mut byte)?;
//!     }
//!     Ok(total)
//! }
//! ```

/// Common error types for console operations
pub mod error;

/// Label tables and the positional template formatter
pub mod labels;

pub use error::Error;

/// A non-blocking byte transport to and from an interactive console.
///
/// Implementations wrap the concrete hardware or bridge. All operations must
/// return without waiting: `read` with an empty receive queue returns
/// `Ok(0)`, `write` with a full transmit queue may return fewer bytes than
/// requested.
pub trait Console {
    /// Check whether at least one received byte is pending.
    fn ready_read(&mut self) -> bool;

    /// Read up to `buf.len()` pending bytes into `buf`.
    ///
    /// Returns the number of bytes actually copied, `Ok(0)` when nothing is
    /// pending. Never blocks.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Queue bytes for transmission.
    ///
    /// Returns the number of bytes accepted. Implementations that cannot
    /// accept the whole slice report the shorter count rather than blocking.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;

    /// Push any queued output to the wire.
    fn flush(&mut self) -> Result<(), Error>;

    /// Look at a pending receive byte without consuming it.
    ///
    /// `offset` 0 is the byte the next `read` would return. Returns `None`
    /// when fewer than `offset + 1` bytes are pending.
    fn peek(&mut self, offset: usize) -> Option<u8>;
}

/// Extract the contents of a double-quoted string from pending console input.
///
/// Scans the receive queue for an opening `"`, copies everything up to the
/// closing `"` into `buf`, and consumes the whole run including both quotes
/// and any bytes preceding the opening quote. This is an auxiliary input
/// convention used by command-style pages; the engine core never calls it.
///
/// # Returns
///
/// * `Ok(len)` - Number of bytes copied into `buf`
/// * `Err(Error::NotReady)` - No complete quoted string is pending yet; the
///   receive queue is left untouched
/// * `Err(Error::Overflow)` - The quoted run does not fit in `buf`; the run
///   is consumed and discarded
///
/// # Examples
///
/// ```rust,no_run
/// use libmenu::console::{read_quoted, Console, Error};
/// # struct Mock;
/// # impl Console for Mock {
/// #     fn ready_read(&mut self) -> bool { false }
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Error> { Ok(0) }
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Error> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), Error> { Ok(()) }
/// #     fn peek(&mut self, _offset: usize) -> Option<u8> { None }
/// # }
///
/// let mut console = Mock;
/// let mut name = [0u8; 32];
/// match read_quoted(&mut console, &mut name) {
///     Ok(len) => { /* name[..len] holds the string */ }
///     Err(Error::NotReady) => { /* try again next tick */ }
///     Err(e) => { /* report */ }
/// }
/// ```
pub fn read_quoted(console: &mut dyn Console, buf: &mut [u8]) -> Result<usize, Error> {
    // Locate the opening quote without consuming anything.
    let mut start = 0;
    loop {
        match console.peek(start) {
            Some(b'"') => break,
            Some(_) => start += 1,
            None => return Err(Error::NotReady),
        }
    }

    // Locate the closing quote.
    let mut end = start + 1;
    loop {
        match console.peek(end) {
            Some(b'"') => break,
            Some(_) => end += 1,
            None => return Err(Error::NotReady),
        }
    }

    let len = end - start - 1;
    let fits = len <= buf.len();

    // Consume everything through the closing quote.
    let mut scratch = [0u8; 1];
    let mut copied = 0;
    for index in 0..=end {
        if console.read(&mut scratch)? != 1 {
            return Err(Error::ReadError);
        }
        if fits && index > start && index < end {
            buf[copied] = scratch[0];
            copied += 1;
        }
    }

    if fits { Ok(len) } else { Err(Error::Overflow) }
}
