//! Sensor Link and Reply Shaping for HydraWatch Hosts
//!
//! ## Overview
//!
//! The core crate frames and parses bytes but never touches a transport.
//! This crate is the thin std-side layer on top of it:
//!
//! ```text
//! ByteSource ──poll()──→ SensorLink ──→ MeasurementRecord
//!                            │                │
//!                            │                ├──→ LiveSession (history)
//!                            │                │
//!                            └────────────────┴──→ HttpReply (status + JSON)
//! ```
//!
//! - [`link::SensorLink`] owns a byte source, a framer and a wire format and
//!   turns available input into at most one record per poll.
//! - [`session::LiveSession`] records every sample a link yields into a
//!   bounded history, stamped by a [`TimeSource`](hydrawatch_core::TimeSource).
//! - [`http::HttpReply`] maps the outcome of one poll onto the status and JSON
//!   body a web endpoint forwards.
//!
//! ## Polling Model
//!
//! Nothing here blocks or spawns threads. Every operation is a single step
//! driven by the caller's scheduler, in the `nb` style used by the sources:
//!
//! ```rust
//! use hydrawatch_connectors::{LinkError, SensorLink};
//! use hydrawatch_core::{MeasurementRecord, MemorySource};
//!
//! let mut link = SensorLink::new(MemorySource::from_bytes(b"<Temperature=21.5>"));
//!
//! match link.poll() {
//!     Ok(MeasurementRecord::Reading(r)) => assert_eq!(r.temperature, 21.5),
//!     Ok(other) => panic!("unexpected record {:?}", other),
//!     Err(nb::Error::WouldBlock) => { /* poll again later */ }
//!     Err(nb::Error::Other(LinkError::Format(e))) => eprintln!("bad message: {}", e),
//!     Err(nb::Error::Other(LinkError::Transport(e))) => eprintln!("serial: {:?}", e),
//! }
//! ```
//!
//! Cancelling is simply not polling again. [`SensorLink::reset`] clears
//! partial input before a new session starts.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use hydrawatch_core::FormatError;
use thiserror::Error;

pub mod http;
pub mod link;
pub mod session;

pub use http::{ErrorBody, HttpReply, ReadingEndpoint, ReplyBody};
pub use link::{LinkConfig, LinkStats, SensorLink};
pub use session::{DashboardSession, LiveSession};

/// Why a poll produced no record
#[derive(Debug, Error, PartialEq)]
pub enum LinkError<E> {
    /// The byte source reported a failure
    #[error("Transport error: {0:?}")]
    Transport(E),

    /// A complete message arrived but did not parse
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl<E> LinkError<E> {
    /// Short, stable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Format(_) => "format_error",
        }
    }

    /// True if the link can keep polling after this error
    ///
    /// Format errors concern one message only; the framer has already moved
    /// past it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// Result type for one poll of a link
pub type PollResult<T, E> = nb::Result<T, LinkError<E>>;
