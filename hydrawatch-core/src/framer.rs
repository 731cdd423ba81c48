//! Stream Framer for the Sensor Serial Line
//!
//! ## Overview
//!
//! The sensor firmware prints records as `<payload>` onto a serial line that
//! has no packet boundaries of its own. Bytes arrive in arbitrary chunks: one
//! at a time from a polling loop, or many at once from a buffered read. The
//! [`Framer`] accumulates them and hands back each complete payload exactly
//! once, in arrival order.
//!
//! ## Framing Rules
//!
//! ```text
//! buffer:  ..noise..<payload>rest
//!                   ↑       ↑
//!               first '<'  first '>'
//!
//! '<' before '>'  → emit "payload", keep "rest"
//! '>' before '<'  → drop everything through '>', emit nothing
//! either missing  → keep buffering
//! ```
//!
//! Dropping through an orphaned `>` is how the framer resynchronizes after
//! joining a stream mid-frame or after line noise. The drop is counted in
//! [`FramerStats::fragments_discarded`] and logged at debug level; it is not
//! surfaced as an error.
//!
//! ## Chunking Invariance
//!
//! The sequence of messages depends only on the byte sequence, never on how
//! it was chunked. Feeding `b"<a><b>"` through one [`Framer::extend`] call or
//! through six [`Framer::push`] calls yields `a` then `b` either way.
//!
//! ## Memory Bound
//!
//! A line that never sends `>` would otherwise grow the buffer forever.
//! After every byte, a buffer longer than [`FramerConfig::max_buffer_len`]
//! is cut back to its most recent `<`, or cleared when even that tail is
//! too long. A frame longer than the bound is therefore lost the same way
//! whether it arrives in one read or one byte at a time.
//!
//! ## Usage Example
//!
//! ```rust
//! use hydrawatch_core::framer::Framer;
//!
//! let mut framer = Framer::new();
//!
//! // Partial frame: nothing yet
//! assert!(framer.push(b'<').is_none());
//! for &b in b"temperature=20.0, pressure=1" {
//!     assert!(framer.push(b).is_none());
//! }
//!
//! // Closing delimiter completes it
//! let message = framer.push(b'>').unwrap();
//! assert_eq!(message.as_str(), "temperature=20.0, pressure=1");
//!
//! // Several frames in one read
//! let texts: Vec<_> = framer.extend(b"<a><b>").map(|m| m.into_string()).collect();
//! assert_eq!(texts, ["a", "b"]);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{collections::VecDeque, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::collections::VecDeque;

use core::fmt;

use crate::constants::framing::{
    DEFAULT_MAX_BUFFER_LEN, END_DELIMITER, MIN_BUFFER_LEN, START_DELIMITER,
};

/// Payload extracted from between a start and end delimiter
///
/// Immutable once created. Invalid UTF-8 from the wire is replaced with
/// U+FFFD so the parser always sees text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
}

impl Message {
    fn from_payload(payload: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// Payload text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the message, returning its text
    pub fn into_string(self) -> String {
        self.text
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True for an empty frame (`<>`)
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Framer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramerConfig {
    /// Upper bound on unframed bytes held between calls
    pub max_buffer_len: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
        }
    }
}

impl FramerConfig {
    /// Set the buffer bound, clamped so one frame always fits
    pub fn with_max_buffer_len(mut self, len: usize) -> Self {
        self.max_buffer_len = len.max(MIN_BUFFER_LEN);
        self
    }
}

/// Counters describing what the framer has seen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramerStats {
    /// Bytes accepted via `push`/`extend`
    pub bytes_received: usize,
    /// Complete messages handed out
    pub frames_emitted: usize,
    /// Orphaned fragments dropped during resynchronization
    pub fragments_discarded: usize,
    /// Times the buffer bound forced bytes to be dropped
    pub overflows: usize,
}

/// Accumulates serial bytes and extracts `<...>` delimited messages
///
/// One framer owns one byte buffer. It is not shared and needs no locking;
/// give each serial session its own instance or call [`Framer::reset`]
/// between sessions.
///
/// ## Internal Invariants
///
/// - The buffer never holds an end delimiter; each `>` completes or discards
///   what is buffered the moment it arrives.
/// - `buffer.len() <= config.max_buffer_len` after every byte.
/// - `ready` holds completed messages in arrival order until pulled.
#[derive(Debug, Clone, Default)]
pub struct Framer {
    buffer: Vec<u8>,
    ready: VecDeque<Message>,
    config: FramerConfig,
    stats: FramerStats,
}

impl Framer {
    /// Create a framer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a framer with custom configuration
    pub fn with_config(config: FramerConfig) -> Self {
        Self {
            buffer: Vec::new(),
            ready: VecDeque::new(),
            config,
            stats: FramerStats::default(),
        }
    }

    /// Feed one byte, returning the oldest message not yet handed out
    pub fn push(&mut self, byte: u8) -> Option<Message> {
        self.ingest(byte);
        self.ready.pop_front()
    }

    /// Feed a batch of bytes and iterate over every message it completes
    ///
    /// Messages not pulled from the iterator stay queued and come out of the
    /// next [`Framer::next_message`], `push` or `extend` call.
    pub fn extend(&mut self, bytes: &[u8]) -> Messages<'_> {
        for &byte in bytes {
            self.ingest(byte);
        }
        Messages { framer: self }
    }

    /// Oldest completed message not yet handed out, if any
    pub fn next_message(&mut self) -> Option<Message> {
        self.ready.pop_front()
    }

    fn ingest(&mut self, byte: u8) {
        self.stats.bytes_received += 1;

        if byte != END_DELIMITER {
            self.buffer.push(byte);
            self.enforce_bound();
            return;
        }

        match self.buffer.iter().position(|&b| b == START_DELIMITER) {
            Some(start) => {
                let message = Message::from_payload(&self.buffer[start + 1..]);
                self.ready.push_back(message);
                self.stats.frames_emitted += 1;
            }
            None => {
                // '>' with no '<' ahead of it: orphaned tail of a frame
                log_debug!(
                    "discarding {} byte fragment without frame start",
                    self.buffer.len() + 1
                );
                self.stats.fragments_discarded += 1;
            }
        }
        self.buffer.clear();
    }

    /// Drop buffered bytes and queued messages, e.g. when a new serial
    /// session starts
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.ready.clear();
    }

    /// Bytes of the frame in progress
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Completed messages waiting to be pulled
    pub fn queued(&self) -> usize {
        self.ready.len()
    }

    /// Counters since creation
    pub fn stats(&self) -> &FramerStats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    fn enforce_bound(&mut self) {
        if self.buffer.len() <= self.config.max_buffer_len {
            return;
        }

        let before = self.buffer.len();
        match self.buffer.iter().rposition(|&b| b == START_DELIMITER) {
            Some(start) if before - start <= self.config.max_buffer_len => {
                self.buffer.drain(..start);
            }
            _ => self.buffer.clear(),
        }

        self.stats.overflows += 1;
        log_warn!(
            "framer buffer exceeded {} bytes, dropped {} bytes",
            self.config.max_buffer_len,
            before - self.buffer.len()
        );
    }
}

/// Iterator over the messages completed by a [`Framer::extend`] call
pub struct Messages<'a> {
    framer: &'a mut Framer,
}

impl Iterator for Messages<'_> {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        self.framer.next_message()
    }
}
