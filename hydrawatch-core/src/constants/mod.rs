//! Constants for HydraWatch Core
//!
//! Centralized values used by the framer, parser and reading history.
//! Every number lives here with its unit in the name so call sites never
//! carry magic values.
//!
//! ## Organization
//!
//! - **Framing**: wire delimiters and buffer limits for the serial stream
//! - **Wire**: field separators and phrases used by the two record formats
//! - **Buffers**: history capacities for the live session table
//! - **Time**: unit conversions

/// Delimiters and limits for the serial framing layer.
pub mod framing;

/// Separators and phrases of the sensor record formats.
pub mod wire;

/// Buffer sizes for in-memory reading history.
pub mod buffers;

/// Time unit conversions.
pub mod time;
