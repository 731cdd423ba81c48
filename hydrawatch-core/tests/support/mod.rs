//! Shared helpers for framing integration tests
//!
//! Builds byte streams the way the sensor firmware emits them, with optional
//! line noise between frames.

#![allow(dead_code)]

use proptest::prelude::*;

/// Wrap a payload in frame delimiters
pub fn frame(payload: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 2);
    bytes.push(b'<');
    bytes.extend_from_slice(payload.as_bytes());
    bytes.push(b'>');
    bytes
}

/// Concatenate framed payloads, separated by the firmware's CRLF
pub fn stream_of(payloads: &[String]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for payload in payloads {
        bytes.extend(frame(payload));
        bytes.extend_from_slice(b"\r\n");
    }
    bytes
}

/// Sample-format record text
pub fn sample_text(temperature: f32, high: bool) -> String {
    format!("temperature={:.1}, pressure={}", temperature, u8::from(high))
}

/// Payload text without delimiter characters
pub fn payload() -> impl Strategy<Value = String> {
    "[^<>]{0,40}"
}

/// ASCII payload text that may run past a small buffer bound
pub fn long_payload() -> impl Strategy<Value = String> {
    "[a-z0-9=., ]{0,120}"
}

/// Noise that contains no start delimiter
pub fn noise() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no frame start", |b| *b != b'<'), 0..20)
}
