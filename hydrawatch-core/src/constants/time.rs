//! Time-Related Constants

/// Milliseconds per second, as a float for timestamp-to-seconds conversion.
pub const MS_PER_SECOND: f64 = 1000.0;
