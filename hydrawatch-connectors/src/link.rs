//! Poll-driven link from a byte source to parsed records
//!
//! ## Design Decisions
//!
//! A link never waits. Each [`SensorLink::poll`] reads what the source has
//! right now and stops at the first complete message, so one poll yields at
//! most one record. Bytes after that message stay in the source for the next
//! poll.
//!
//! A source that never runs dry (a noisy line with no `>`) would otherwise
//! keep one poll busy indefinitely, so reads per poll are capped by
//! [`LinkConfig::max_bytes_per_poll`]. Hitting the cap reports
//! `WouldBlock`, and the caller's scheduler decides when to come back.

use core::fmt;

use hydrawatch_core::{
    parse, ByteSource, Framer, FramerConfig, FramerStats, MeasurementRecord, Message, WireFormat,
};
use serde::{Deserialize, Serialize};

use crate::{LinkError, PollResult};

/// Default cap on bytes read in one poll
pub const DEFAULT_MAX_BYTES_PER_POLL: usize = 1024;

/// Link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Record format the firmware speaks
    pub format: WireFormat,
    /// Framer limits
    pub framer: FramerConfig,
    /// Upper bound on `read_byte` calls per poll
    pub max_bytes_per_poll: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            format: WireFormat::default(),
            framer: FramerConfig::default(),
            max_bytes_per_poll: DEFAULT_MAX_BYTES_PER_POLL,
        }
    }
}

impl LinkConfig {
    /// Expect messages in `format`
    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    /// Use custom framer limits
    pub fn with_framer(mut self, framer: FramerConfig) -> Self {
        self.framer = framer;
        self
    }

    /// Read at most `limit` bytes per poll (at least one)
    pub fn with_max_bytes_per_poll(mut self, limit: usize) -> Self {
        self.max_bytes_per_poll = limit.max(1);
        self
    }
}

/// Counters for one link
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Bytes taken from the source
    pub bytes_read: usize,
    /// Messages parsed into records
    pub records: usize,
    /// Messages rejected by the parser
    pub format_errors: usize,
    /// Failures reported by the source
    pub transport_errors: usize,
}

/// A byte source, its framer and the expected wire format
pub struct SensorLink<S> {
    source: S,
    framer: Framer,
    config: LinkConfig,
    stats: LinkStats,
}

impl<S> SensorLink<S>
where
    S: ByteSource,
    S::Error: fmt::Debug,
{
    /// Link speaking the reading format with default limits
    pub fn new(source: S) -> Self {
        Self::with_config(source, LinkConfig::default())
    }

    /// Link with custom configuration
    pub fn with_config(source: S, config: LinkConfig) -> Self {
        Self {
            source,
            framer: Framer::with_config(config.framer),
            config,
            stats: LinkStats::default(),
        }
    }

    /// Process available input, yielding at most one record
    ///
    /// - `Ok(record)`: a message completed and parsed
    /// - `Err(WouldBlock)`: no complete message yet; partial input is kept
    /// - `Err(Other(Format))`: a message completed but was rejected; polling
    ///   may continue
    /// - `Err(Other(Transport))`: the source failed
    pub fn poll(&mut self) -> PollResult<MeasurementRecord, S::Error> {
        for _ in 0..self.config.max_bytes_per_poll {
            match self.source.read_byte() {
                Ok(byte) => {
                    self.stats.bytes_read += 1;
                    if let Some(message) = self.framer.push(byte) {
                        return self.accept(message);
                    }
                }
                Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
                Err(nb::Error::Other(e)) => {
                    self.stats.transport_errors += 1;
                    log::error!("Sensor transport failed: {:?}", e);
                    return Err(nb::Error::Other(LinkError::Transport(e)));
                }
            }
        }

        log::debug!(
            "Read budget of {} bytes spent without a complete message",
            self.config.max_bytes_per_poll
        );
        Err(nb::Error::WouldBlock)
    }

    fn accept(&mut self, message: Message) -> PollResult<MeasurementRecord, S::Error> {
        match parse(self.config.format, message.as_str()) {
            Ok(record) => {
                self.stats.records += 1;
                log::debug!("Parsed {:?}", record);
                Ok(record)
            }
            Err(e) => {
                self.stats.format_errors += 1;
                log::warn!("Rejected sensor message: {}", e);
                Err(nb::Error::Other(e.into()))
            }
        }
    }

    /// Drop partial input, e.g. when a new session starts
    ///
    /// Counters are kept.
    pub fn reset(&mut self) {
        if !self.framer.is_empty() {
            log::debug!("Discarding {} buffered bytes on reset", self.framer.len());
        }
        self.framer.reset();
    }

    /// Link counters
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Framer counters (discards, overflows)
    pub fn framer_stats(&self) -> &FramerStats {
        self.framer.stats()
    }

    /// Active configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Bytes held for an incomplete message
    pub fn pending(&self) -> &[u8] {
        self.framer.buffered()
    }

    /// The underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The underlying source, e.g. to feed a [`MemorySource`](hydrawatch_core::MemorySource)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give the source back
    pub fn into_source(self) -> S {
        self.source
    }
}
