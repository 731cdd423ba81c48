//! Core serial ingestion for HydraWatch
//!
//! Turns the raw byte stream of a temperature/pressure sensor board into
//! typed records. Designed to run on a gateway or directly on an edge
//! device: no threads, no blocking, and `no_std` + `alloc` capable.
//!
//! Pipeline:
//! - [`framer`]: bytes → `<...>` delimited messages
//! - [`parser`]: message text → [`Reading`] or [`SensorSample`]
//! - [`history`]: recent samples for the live session
//!
//! ```rust
//! use hydrawatch_core::{Framer, parse_sample, PressureLevel};
//!
//! let mut framer = Framer::new();
//! let message = framer
//!     .extend(b"<temperature=20.0, pressure=1>")
//!     .next()
//!     .unwrap();
//!
//! let sample = parse_sample(message.as_str())?;
//! assert_eq!(sample.pressure, PressureLevel::High);
//! # Ok::<(), hydrawatch_core::FormatError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

pub mod constants;
pub mod errors;
pub mod framer;
pub mod history;
pub mod parser;
pub mod series;
pub mod source;
pub mod time;

// Public API
pub use errors::{FormatError, FormatResult};
pub use framer::{Framer, FramerConfig, FramerStats, Message};
pub use history::{ReadingHistory, TimestampedSample};
pub use parser::{
    parse, parse_reading, parse_sample, MeasurementRecord, PressureLevel, Reading, SensorSample,
    WireFormat,
};
pub use series::TimeSeriesPoint;
pub use source::{ByteSource, MemorySource};
pub use time::{FixedTime, TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
