//! Serial Framing Constants
//!
//! The sensor firmware wraps every record as `<payload>`. There is no escape
//! mechanism, so payloads can never contain either delimiter.

/// Byte that opens a frame.
pub const START_DELIMITER: u8 = b'<';

/// Byte that closes a frame.
pub const END_DELIMITER: u8 = b'>';

/// Default upper bound on buffered, not-yet-framed bytes.
///
/// A frame from the sensor firmware is well under 64 bytes. 4 KiB leaves room
/// for long bursts of valid frames delivered in one read while still capping
/// memory when the line is noisy and no end delimiter ever arrives.
pub const DEFAULT_MAX_BUFFER_LEN: usize = 4096;

/// Smallest accepted buffer bound. Anything lower could not hold a full frame.
pub const MIN_BUFFER_LEN: usize = 16;
