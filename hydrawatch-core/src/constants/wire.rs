//! Record Format Constants
//!
//! Two producers exist in the field:
//!
//! ```text
//! Reading format:  Temperature=25.3, Pressure detected
//! Sample format:   temperature=20.0, pressure=1
//! ```

/// Separates a key from its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Separates fields within one record.
pub const FIELD_SEPARATOR: char = ',';

/// Phrase the reading format appends when the pressure switch is closed.
pub const PRESSURE_DETECTED_PHRASE: &str = "Pressure detected";

/// Number of `key=value` fields in the sample format.
pub const SAMPLE_FIELD_COUNT: usize = 2;

/// Pressure flag value meaning "high".
pub const PRESSURE_HIGH_FLAG: i64 = 1;

/// Pressure flag value meaning "low".
pub const PRESSURE_LOW_FLAG: i64 = 0;
