//! Buffer Sizes for Reading History
//!
//! The live session keeps recent samples in a fixed ring so memory use is
//! known up front, whatever the session length.

/// Default number of samples kept for the live session table.
///
/// At the firmware's 1 Hz report rate this covers about four minutes,
/// enough for the dashboard chart window.
pub const DEFAULT_HISTORY_SIZE: usize = 256;
