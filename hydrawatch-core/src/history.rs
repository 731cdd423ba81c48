//! Fixed-Size Reading History for the Live Session
//!
//! ## Overview
//!
//! The live dashboard shows two views of the same samples: a table with the
//! newest sample on top, and a temperature chart running oldest to newest.
//! [`ReadingHistory`] keeps the most recent `N` samples in a ring so both views
//! come from one store whose size is fixed at compile time.
//!
//! ### Memory Layout
//!
//! ```text
//! ReadingHistory<5> after 7 pushes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             write_pos = 2 (also the oldest slot once full)
//!
//! iter():              s2 s3 s4 s5 s6
//! iter_newest_first(): s6 s5 s4 s3 s2
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use hydrawatch_core::history::ReadingHistory;
//! use hydrawatch_core::parser::{PressureLevel, SensorSample};
//!
//! let mut history: ReadingHistory<8> = ReadingHistory::new();
//! history.push(1_000, SensorSample { temperature: 4.0, pressure: PressureLevel::Low });
//! history.push(2_000, SensorSample { temperature: 4.5, pressure: PressureLevel::High });
//!
//! let latest = history.latest().unwrap();
//! assert_eq!(latest.sample.pressure.label(), "High");
//!
//! // Seconds since the first retained sample, ready for trend fitting
//! let series = history.temperature_series();
//! assert_eq!(series[1].time, 1.0);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{
    constants::time::MS_PER_SECOND,
    parser::SensorSample,
    series::TimeSeriesPoint,
    time::Timestamp,
};

/// A sample with its host-side arrival time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampedSample {
    /// Arrival time in milliseconds
    pub timestamp: Timestamp,
    /// Parsed sample
    pub sample: SensorSample,
}

/// Ring of the most recent `N` samples
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Logical index 0 is always the oldest retained sample
#[derive(Clone)]
pub struct ReadingHistory<const N: usize> {
    data: [Option<TimestampedSample>; N],
    write_pos: usize,
    len: usize,
}

impl<const N: usize> ReadingHistory<N> {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Record a sample, overwriting the oldest once full
    pub fn push(&mut self, timestamp: Timestamp, sample: SensorSample) {
        if N == 0 {
            return;
        }

        self.data[self.write_pos] = Some(TimestampedSample { timestamp, sample });
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once older samples are being overwritten
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&TimestampedSample> {
        if self.is_empty() {
            return None;
        }
        self.get(self.len - 1)
    }

    /// Iterate oldest to newest (chart order)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TimestampedSample> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Iterate newest to oldest (table order)
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &TimestampedSample> + '_ {
        self.iter().rev()
    }

    /// Temperatures as points, time in seconds since the oldest retained sample
    pub fn temperature_series(&self) -> Vec<TimeSeriesPoint> {
        let Some(origin) = self.get(0).map(|s| s.timestamp) else {
            return Vec::new();
        };

        self.iter()
            .map(|s| {
                let elapsed_ms = s.timestamp.saturating_sub(origin);
                TimeSeriesPoint::new(
                    elapsed_ms as f64 / MS_PER_SECOND,
                    f64::from(s.sample.temperature),
                )
            })
            .collect()
    }

    /// Forget all samples
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    // Logical index (0 = oldest) to physical slot
    fn get(&self, index: usize) -> Option<&TimestampedSample> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

impl<const N: usize> Default for ReadingHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PressureLevel;

    fn sample(temperature: f32) -> SensorSample {
        SensorSample {
            temperature,
            pressure: PressureLevel::Low,
        }
    }

    #[test]
    fn empty_history() {
        let history: ReadingHistory<4> = ReadingHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.temperature_series().is_empty());
    }

    #[test]
    fn overwrite_keeps_newest() {
        let mut history = ReadingHistory::<3>::new();
        for i in 0..5 {
            history.push(i * 1000, sample(i as f32));
        }

        assert!(history.is_full());
        let temps: Vec<f32> = history.iter().map(|s| s.sample.temperature).collect();
        assert_eq!(temps, vec![2.0, 3.0, 4.0]);
        assert_eq!(history.latest().unwrap().sample.temperature, 4.0);
    }

    #[test]
    fn newest_first_order() {
        let mut history = ReadingHistory::<4>::new();
        for i in 0..6 {
            history.push(i, sample(i as f32));
        }

        let stamps: Vec<u64> = history.iter_newest_first().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![5, 4, 3, 2]);
    }

    #[test]
    fn series_is_relative_to_oldest() {
        let mut history = ReadingHistory::<2>::new();
        history.push(10_000, sample(1.0));
        history.push(12_500, sample(2.0));
        history.push(14_000, sample(3.0));

        let series = history.temperature_series();
        assert_eq!(series[0], TimeSeriesPoint::new(0.0, 2.0));
        assert_eq!(series[1], TimeSeriesPoint::new(1.5, 3.0));
    }

    #[test]
    fn clear_empties() {
        let mut history = ReadingHistory::<2>::new();
        history.push(1, sample(1.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.iter().count(), 0);
    }
}
