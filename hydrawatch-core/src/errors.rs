//! Error Types for Record Parsing Failures
//!
//! ## Design Philosophy
//!
//! Every failure the core can hit is returned as a value. Nothing panics and
//! nothing is retried internally; the caller decides whether to poll again,
//! report upstream, or drop the record.
//!
//! 1. **Raw text preserved**: each parse error carries the offending message
//!    so the web layer can echo it back (`raw_data`) for diagnosis.
//!
//! 2. **Stable kinds**: [`FormatError::kind`] gives a short machine-readable
//!    tag that does not change with the human-readable message.
//!
//! 3. **All or nothing**: a malformed record never yields a partially filled
//!    value. Either every field parses or the whole record is rejected.
//!
//! ## Error Categories
//!
//! ### Layout Violations
//! - `MissingSeparator`: no `=` anywhere in the text
//! - `FieldCount`: the sample format did not have exactly two fields
//!
//! ### Value Violations
//! - `InvalidNumber`: a numeric field did not parse, or was NaN/infinite
//! - `InvalidPressure`: the pressure flag was an integer other than 0 or 1
//!
//! Framing problems are not errors at all: orphaned fragments are discarded
//! and the framer resynchronizes on its own (see [`crate::framer`]).
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use hydrawatch_core::{parse_reading, FormatError};
//!
//! match parse_reading("bad data") {
//!     Ok(reading) => println!("{} °C", reading.temperature),
//!     Err(FormatError::MissingSeparator { raw }) => {
//!         // Unexpected layout - report the raw text
//!         assert_eq!(raw, "bad data");
//!     }
//!     Err(other) => println!("rejected: {}", other),
//! }
//! ```

#[cfg(not(feature = "std"))]
use alloc::string::String;

use thiserror_no_std::Error;

/// Result type for parse operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Message text that does not match the expected record layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No `key=value` separator in the message
    #[error("Unexpected data format: no '=' in {raw:?}")]
    MissingSeparator {
        /// Message text as received
        raw: String,
    },

    /// A numeric field could not be parsed as a finite number
    #[error("Invalid {field} value in {raw:?}")]
    InvalidNumber {
        /// Which field failed
        field: &'static str,
        /// Message text as received
        raw: String,
    },

    /// Wrong number of comma-separated fields
    #[error("Expected {expected} fields, found {found} in {raw:?}")]
    FieldCount {
        /// Fields the format requires
        expected: usize,
        /// Fields present in the message
        found: usize,
        /// Message text as received
        raw: String,
    },

    /// Pressure flag outside the 0/1 domain
    #[error("Pressure flag must be 0 or 1, got {value} in {raw:?}")]
    InvalidPressure {
        /// The integer that was sent
        value: i64,
        /// Message text as received
        raw: String,
    },
}

impl FormatError {
    /// Short, stable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSeparator { .. } => "missing_separator",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::FieldCount { .. } => "field_count",
            Self::InvalidPressure { .. } => "invalid_pressure",
        }
    }

    /// The message text that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            Self::MissingSeparator { raw }
            | Self::InvalidNumber { raw, .. }
            | Self::FieldCount { raw, .. }
            | Self::InvalidPressure { raw, .. } => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_text_is_kept() {
        let err = FormatError::FieldCount {
            expected: 2,
            found: 1,
            raw: "temperature=20.0".into(),
        };
        assert_eq!(err.raw(), "temperature=20.0");
        assert_eq!(err.kind(), "field_count");
    }

    #[test]
    fn display_mentions_field() {
        let err = FormatError::InvalidNumber {
            field: "temperature",
            raw: "temperature=abc".into(),
        };
        let text = err.to_string();
        assert!(text.contains("temperature"));
        assert!(text.contains("abc"));
    }
}
