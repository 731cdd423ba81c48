//! Live dashboard session
//!
//! Couples a link speaking the sample format with a bounded history, so the
//! dashboard can show a table of recent samples and chart temperature over
//! the session. Samples are stamped with host arrival time since the firmware
//! sends none.

use core::fmt;

use hydrawatch_core::{
    constants::buffers::DEFAULT_HISTORY_SIZE, ByteSource, MeasurementRecord, ReadingHistory,
    TimeSeriesPoint, TimeSource, WireFormat,
};

use crate::{link::LinkConfig, PollResult, SensorLink};

/// Session with the default history capacity
pub type DashboardSession<S, T> = LiveSession<S, T, DEFAULT_HISTORY_SIZE>;

/// Default cap on link polls in one [`LiveSession::poll_available`] pass
pub const DEFAULT_MAX_POLLS_PER_PASS: usize = 64;

/// A sample-format link recording into a ring of `N` samples
pub struct LiveSession<S, T, const N: usize> {
    link: SensorLink<S>,
    clock: T,
    history: ReadingHistory<N>,
    max_polls_per_pass: usize,
}

impl<S, T, const N: usize> LiveSession<S, T, N>
where
    S: ByteSource,
    S::Error: fmt::Debug,
    T: TimeSource,
{
    /// Session reading the sample format from `source`
    pub fn new(source: S, clock: T) -> Self {
        let config = LinkConfig::default().with_format(WireFormat::Sample);
        Self::from_link(SensorLink::with_config(source, config), clock)
    }

    /// Session over an existing link
    ///
    /// Only sample records carry a pressure level, so a link in the reading
    /// format passes its records through without recording them.
    pub fn from_link(link: SensorLink<S>, clock: T) -> Self {
        Self {
            link,
            clock,
            history: ReadingHistory::new(),
            max_polls_per_pass: DEFAULT_MAX_POLLS_PER_PASS,
        }
    }

    /// Poll at most `limit` times per [`LiveSession::poll_available`] pass
    /// (at least once)
    pub fn with_max_polls_per_pass(mut self, limit: usize) -> Self {
        self.max_polls_per_pass = limit.max(1);
        self
    }

    /// Poll the link once, recording a sample if one arrives
    pub fn poll(&mut self) -> PollResult<MeasurementRecord, S::Error> {
        let record = self.link.poll()?;
        if let MeasurementRecord::Sample(sample) = record {
            self.history.push(self.clock.now(), sample);
        }
        Ok(record)
    }

    /// Poll until the link would block, returning how many records arrived
    ///
    /// A pass stops after `max_polls_per_pass` polls even if input remains,
    /// so a line that never goes quiet cannot hold the caller. Whatever is
    /// left is picked up by the next pass. Format errors are skipped (they
    /// are counted in the link stats). A transport error ends the pass and
    /// is returned.
    pub fn poll_available(&mut self) -> PollResult<usize, S::Error> {
        let mut records = 0;
        for _ in 0..self.max_polls_per_pass {
            match self.poll() {
                Ok(_) => records += 1,
                Err(nb::Error::Other(e)) if e.is_recoverable() => {}
                Err(nb::Error::WouldBlock) => return Ok(records),
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "Stopped after {} polls with input still pending",
            self.max_polls_per_pass
        );
        Ok(records)
    }

    /// Recorded samples
    pub fn history(&self) -> &ReadingHistory<N> {
        &self.history
    }

    /// Temperature over the session, seconds since the oldest retained sample
    pub fn temperature_series(&self) -> Vec<TimeSeriesPoint> {
        self.history.temperature_series()
    }

    /// The underlying link
    pub fn link(&self) -> &SensorLink<S> {
        &self.link
    }

    /// The underlying link, mutably
    pub fn link_mut(&mut self) -> &mut SensorLink<S> {
        &mut self.link
    }

    /// The session clock
    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Start over: drop partial input and forget recorded samples
    pub fn reset(&mut self) {
        self.link.reset();
        self.history.clear();
    }
}
