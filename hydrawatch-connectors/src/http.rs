//! Reply shaping for the HTTP reading endpoint
//!
//! The web server itself is not part of this crate. What it needs from the
//! link is a status code and a JSON body for each request, and this module
//! produces exactly that from the outcome of one poll:
//!
//! | Outcome           | Status | Body                                                    |
//! |-------------------|--------|---------------------------------------------------------|
//! | record            | 200    | `{"temperature": 25.3, "pressure_detected": true}`      |
//! | format error      | 400    | `{"kind": "format_error", "message": .., "raw_data": ..}` |
//! | nothing available | 204    | `{"kind": "no_data", "message": "No data available from sensor"}` |
//! | transport error   | 500    | `{"kind": "transport", "message": ..}`                  |
//!
//! A 204 body is advisory; servers that follow HTTP strictly drop it.
//!
//! ## Example Usage
//!
//! ```rust
//! use hydrawatch_connectors::ReadingEndpoint;
//! use hydrawatch_core::MemorySource;
//!
//! let mut endpoint = ReadingEndpoint::new(MemorySource::from_bytes(
//!     b"<Temperature=25.3, Pressure detected>",
//! ));
//!
//! let reply = endpoint.handle();
//! assert_eq!(reply.status, 200);
//! assert_eq!(
//!     reply.to_json()?,
//!     r#"{"temperature":25.3,"pressure_detected":true}"#
//! );
//!
//! // Nothing else queued
//! assert_eq!(endpoint.handle().status, 204);
//! # Ok::<(), serde_json::Error>(())
//! ```

use core::fmt;

use hydrawatch_core::{ByteSource, FormatError, MeasurementRecord, Reading, SensorSample};
use serde::Serialize;

use crate::{LinkError, PollResult, SensorLink};

/// Status for a delivered record
pub const STATUS_OK: u16 = 200;
/// Status when the sensor had nothing to report
pub const STATUS_NO_CONTENT: u16 = 204;
/// Status for a message that did not parse
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Status for a failed transport
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Message sent with [`STATUS_NO_CONTENT`]
pub const NO_DATA_MESSAGE: &str = "No data available from sensor";

/// Error payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Stable error tag
    pub kind: String,
    /// Human-readable description
    pub message: String,
    /// Offending message text, for format errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
}

/// JSON body of a reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    /// Record from the reading firmware
    Reading(Reading),
    /// Record from the time-series firmware
    Sample(SensorSample),
    /// Anything that is not a record
    Error(ErrorBody),
}

/// Status code and body for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: ReplyBody,
}

impl HttpReply {
    /// 200 with the record
    pub fn from_record(record: MeasurementRecord) -> Self {
        let body = match record {
            MeasurementRecord::Reading(r) => ReplyBody::Reading(r),
            MeasurementRecord::Sample(s) => ReplyBody::Sample(s),
        };
        Self {
            status: STATUS_OK,
            body,
        }
    }

    /// 400 echoing the rejected message
    pub fn from_format_error(error: &FormatError) -> Self {
        Self::error(
            STATUS_BAD_REQUEST,
            "format_error",
            error.to_string(),
            Some(error.raw().into()),
        )
    }

    /// 204, the sensor had nothing complete to report
    pub fn no_data() -> Self {
        Self::error(STATUS_NO_CONTENT, "no_data", NO_DATA_MESSAGE.into(), None)
    }

    /// 500 describing the transport failure
    pub fn from_transport<E: fmt::Debug>(error: &E) -> Self {
        Self::error(
            STATUS_INTERNAL_ERROR,
            "transport",
            format!("Sensor transport failed: {:?}", error),
            None,
        )
    }

    /// Map the outcome of one poll onto a reply
    pub fn from_poll<E: fmt::Debug>(outcome: PollResult<MeasurementRecord, E>) -> Self {
        match outcome {
            Ok(record) => Self::from_record(record),
            Err(nb::Error::WouldBlock) => Self::no_data(),
            Err(nb::Error::Other(LinkError::Format(e))) => Self::from_format_error(&e),
            Err(nb::Error::Other(LinkError::Transport(e))) => Self::from_transport(&e),
        }
    }

    fn error(status: u16, kind: &str, message: String, raw_data: Option<String>) -> Self {
        Self {
            status,
            body: ReplyBody::Error(ErrorBody {
                kind: kind.into(),
                message,
                raw_data,
            }),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }

    /// Body as a JSON value
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.body)
    }
}

/// The reading endpoint: one poll of the link per request
pub struct ReadingEndpoint<S> {
    link: SensorLink<S>,
}

impl<S> ReadingEndpoint<S>
where
    S: ByteSource,
    S::Error: fmt::Debug,
{
    /// Endpoint over a reading-format link with default limits
    pub fn new(source: S) -> Self {
        Self::from_link(SensorLink::new(source))
    }

    /// Endpoint over an existing link
    pub fn from_link(link: SensorLink<S>) -> Self {
        Self { link }
    }

    /// Answer one request
    pub fn handle(&mut self) -> HttpReply {
        let reply = HttpReply::from_poll(self.link.poll());
        log::debug!("Reading request answered with {}", reply.status);
        reply
    }

    /// The underlying link
    pub fn link(&self) -> &SensorLink<S> {
        &self.link
    }

    /// The underlying link, mutably
    pub fn link_mut(&mut self) -> &mut SensorLink<S> {
        &mut self.link
    }
}
