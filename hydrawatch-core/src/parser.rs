//! Record Parser for Sensor Messages
//!
//! Turns a framed message into a typed record. Two firmware builds are in
//! the field and each speaks its own format. They are kept as two named
//! formats rather than merged into one schema:
//!
//! | Format              | Example                                | Record          |
//! |---------------------|----------------------------------------|-----------------|
//! | [`WireFormat::Reading`] | `Temperature=25.3, Pressure detected` | [`Reading`]     |
//! | [`WireFormat::Sample`]  | `temperature=20.0, pressure=1`        | [`SensorSample`]|
//!
//! Anything else is a [`FormatError`]. A record is either fully parsed or
//! rejected; there are no partially filled records.

use core::fmt;

use heapless::Vec as FieldVec;

use crate::{
    constants::wire::{
        FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, PRESSURE_DETECTED_PHRASE, PRESSURE_HIGH_FLAG,
        PRESSURE_LOW_FLAG, SAMPLE_FIELD_COUNT,
    },
    errors::{FormatError, FormatResult},
};

/// Reading from the HTTP-facing firmware: temperature plus pressure switch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Temperature in °C
    pub temperature: f32,
    /// Whether the firmware reported the pressure phrase
    pub pressure_detected: bool,
}

/// Pressure level reported by the time-series firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureLevel {
    /// Flag `1`
    High,
    /// Flag `0`
    Low,
}

impl PressureLevel {
    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Low => "Low",
        }
    }

    /// True for [`PressureLevel::High`]
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sample from the time-series firmware
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    /// Temperature in °C
    pub temperature: f32,
    /// Pressure level
    pub pressure: PressureLevel,
}

/// Which firmware format a message is expected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WireFormat {
    /// `Label=<float>[, free text]`
    #[default]
    Reading,
    /// `temperature=<float>, pressure=<0|1>`
    Sample,
}

/// A parsed record in either format
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasurementRecord {
    /// Parsed with [`WireFormat::Reading`]
    Reading(Reading),
    /// Parsed with [`WireFormat::Sample`]
    Sample(SensorSample),
}

impl MeasurementRecord {
    /// Temperature in °C, present in both formats
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Reading(r) => r.temperature,
            Self::Sample(s) => s.temperature,
        }
    }
}

/// Parse text according to `format`
pub fn parse(format: WireFormat, text: &str) -> FormatResult<MeasurementRecord> {
    match format {
        WireFormat::Reading => parse_reading(text).map(MeasurementRecord::Reading),
        WireFormat::Sample => parse_sample(text).map(MeasurementRecord::Sample),
    }
}

/// Parse the reading format: `Label=<float>[, free text]`
///
/// The number runs from the first `=` up to the next `,` (or the end).
/// `pressure_detected` is set when the text mentions the pressure phrase
/// anywhere.
pub fn parse_reading(text: &str) -> FormatResult<Reading> {
    let (_, rest) = text
        .split_once(KEY_VALUE_SEPARATOR)
        .ok_or_else(|| FormatError::MissingSeparator { raw: text.into() })?;

    let number = rest
        .split_once(FIELD_SEPARATOR)
        .map_or(rest, |(number, _)| number);

    Ok(Reading {
        temperature: parse_float(number, "temperature", text)?,
        pressure_detected: text.contains(PRESSURE_DETECTED_PHRASE),
    })
}

/// Parse the sample format: `temperature=<float>, pressure=<0|1>`
///
/// Key names are not checked; fields are positional, temperature first.
pub fn parse_sample(text: &str) -> FormatResult<SensorSample> {
    let mut fields: FieldVec<&str, SAMPLE_FIELD_COUNT> = FieldVec::new();
    let mut found = 0;
    for field in text.split(FIELD_SEPARATOR) {
        found += 1;
        // Past capacity: keep counting so the error reports the real total
        let _ = fields.push(field);
    }

    if found != SAMPLE_FIELD_COUNT {
        return Err(FormatError::FieldCount {
            expected: SAMPLE_FIELD_COUNT,
            found,
            raw: text.into(),
        });
    }

    let temperature = parse_float(field_value(fields[0], text)?, "temperature", text)?;

    let flag = field_value(fields[1], text)?
        .trim()
        .parse::<i64>()
        .map_err(|_| FormatError::InvalidNumber {
            field: "pressure",
            raw: text.into(),
        })?;

    let pressure = match flag {
        PRESSURE_HIGH_FLAG => PressureLevel::High,
        PRESSURE_LOW_FLAG => PressureLevel::Low,
        value => {
            return Err(FormatError::InvalidPressure {
                value,
                raw: text.into(),
            })
        }
    };

    Ok(SensorSample {
        temperature,
        pressure,
    })
}

fn field_value<'a>(field: &'a str, raw: &str) -> FormatResult<&'a str> {
    field
        .split_once(KEY_VALUE_SEPARATOR)
        .map(|(_, value)| value)
        .ok_or_else(|| FormatError::MissingSeparator { raw: raw.into() })
}

fn parse_float(value: &str, field: &'static str, raw: &str) -> FormatResult<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormatError::InvalidNumber {
            field,
            raw: raw.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_with_pressure_phrase() {
        let reading = parse_reading("Temperature=25.3, Pressure detected").unwrap();
        assert_eq!(reading.temperature, 25.3);
        assert!(reading.pressure_detected);
    }

    #[test]
    fn reading_without_pressure_phrase() {
        let reading = parse_reading("Temperature=25.3").unwrap();
        assert_eq!(reading.temperature, 25.3);
        assert!(!reading.pressure_detected);
    }

    #[test]
    fn reading_tolerates_whitespace() {
        let reading = parse_reading("Temp = -4.5 ").unwrap();
        assert_eq!(reading.temperature, -4.5);
    }

    #[test]
    fn reading_without_separator_is_rejected() {
        let err = parse_reading("bad data").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingSeparator {
                raw: "bad data".into()
            }
        );
    }

    #[test]
    fn reading_with_bad_number_is_rejected() {
        let err = parse_reading("Temperature=warm").unwrap_err();
        assert!(matches!(err, FormatError::InvalidNumber { field: "temperature", .. }));
        assert_eq!(err.raw(), "Temperature=warm");
    }

    #[test]
    fn reading_rejects_non_finite() {
        assert!(parse_reading("Temperature=NaN").is_err());
        assert!(parse_reading("Temperature=inf").is_err());
    }

    #[test]
    fn sample_high_and_low() {
        let high = parse_sample("temperature=20.0, pressure=1").unwrap();
        assert_eq!(high.temperature, 20.0);
        assert_eq!(high.pressure, PressureLevel::High);

        let low = parse_sample("temperature=20.0, pressure=0").unwrap();
        assert_eq!(low.pressure, PressureLevel::Low);
    }

    #[test]
    fn sample_missing_field_is_rejected() {
        let err = parse_sample("temperature=20.0").unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCount {
                expected: 2,
                found: 1,
                raw: "temperature=20.0".into()
            }
        );
    }

    #[test]
    fn sample_extra_field_is_rejected() {
        let err = parse_sample("temperature=20.0, pressure=1, humidity=40").unwrap_err();
        assert!(matches!(err, FormatError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn sample_non_numeric_fields_are_rejected() {
        assert!(matches!(
            parse_sample("temperature=hot, pressure=1"),
            Err(FormatError::InvalidNumber { field: "temperature", .. })
        ));
        assert!(matches!(
            parse_sample("temperature=20.0, pressure=yes"),
            Err(FormatError::InvalidNumber { field: "pressure", .. })
        ));
        assert!(matches!(
            parse_sample("temperature=20.0, pressure"),
            Err(FormatError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn sample_pressure_out_of_domain() {
        let err = parse_sample("temperature=20.0, pressure=2").unwrap_err();
        assert!(matches!(err, FormatError::InvalidPressure { value: 2, .. }));
    }

    #[test]
    fn dispatch_by_format() {
        let record = parse(WireFormat::Sample, "temperature=18.5, pressure=1").unwrap();
        assert_eq!(record.temperature(), 18.5);
        assert!(matches!(record, MeasurementRecord::Sample(_)));

        let record = parse(WireFormat::Reading, "Temperature=18.5").unwrap();
        assert!(matches!(record, MeasurementRecord::Reading(_)));
    }

    #[test]
    fn pressure_labels() {
        assert_eq!(PressureLevel::High.label(), "High");
        assert_eq!(PressureLevel::Low.to_string(), "Low");
    }
}
