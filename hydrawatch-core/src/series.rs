//! Time series points shared by the live history and the trend analysis

/// One observation of a measured quantity at a numeric time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeriesPoint {
    /// Independent variable (seconds, or any monotone numeric time column)
    pub time: f64,
    /// Measured value
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Create a point
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}
