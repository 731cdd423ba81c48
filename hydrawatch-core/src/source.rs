//! Byte sources feeding the framer
//!
//! ## Design Rationale
//!
//! The serial driver lives outside this crate. What the core needs from it
//! is one non-blocking call in the `nb` style, the same shape as
//! embedded-hal serial reads:
//!
//! - `Ok(byte)`: a byte was available
//! - `Err(nb::Error::WouldBlock)`: nothing available right now, poll later
//! - `Err(nb::Error::Other(e))`: the transport failed
//!
//! A caller polls on its own schedule and simply stops polling to cancel.
//! No call here ever waits.

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use core::convert::Infallible;

/// Non-blocking source of raw bytes from the sensor
pub trait ByteSource {
    /// Transport error type
    type Error;

    /// Read one byte if one is available
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Bytes known to be waiting, if the transport can tell
    fn bytes_available(&self) -> Option<usize> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn bytes_available(&self) -> Option<usize> {
        (**self).bytes_available()
    }
}

/// In-memory byte queue, for tests and replaying captured traffic
///
/// ```rust
/// use hydrawatch_core::source::{ByteSource, MemorySource};
///
/// let mut source = MemorySource::new();
/// source.feed(b"<a>");
/// assert_eq!(source.read_byte(), Ok(b'<'));
/// assert_eq!(source.bytes_available(), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pending: VecDeque<u8>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source preloaded with `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut source = Self::new();
        source.feed(bytes);
        source
    }

    /// Queue more bytes, as if they just arrived on the line
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }

    /// True if every queued byte has been read
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }
}

impl ByteSource for MemorySource {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.pending.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn bytes_available(&self) -> Option<usize> {
        Some(self.pending.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_would_block() {
        let mut source = MemorySource::new();
        assert_eq!(source.read_byte(), Err(nb::Error::WouldBlock));
        assert!(source.is_drained());
    }

    #[test]
    fn bytes_come_out_in_order() {
        let mut source = MemorySource::from_bytes(b"ab");
        source.feed(b"c");
        assert_eq!(source.read_byte(), Ok(b'a'));
        assert_eq!(source.read_byte(), Ok(b'b'));
        assert_eq!(source.read_byte(), Ok(b'c'));
        assert_eq!(source.read_byte(), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn read_one<S: ByteSource>(mut source: S) -> Option<u8> {
            source.read_byte().ok()
        }

        let mut source = MemorySource::from_bytes(b"x");
        assert_eq!(read_one(&mut source), Some(b'x'));
        assert!(source.is_drained());
    }
}
