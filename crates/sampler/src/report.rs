//! The text line protocol spoken over the report channel.
//!
//! One line per cycle, either
//!
//! ```text
//! Temperature: 21.50°C  |  Humidity: 45.00%
//! Failed to read from DHT sensor!
//! ```
//!
//! The firmware renders lines with [`Report::to_line`], the receiver parses
//! them back with [`str::parse`].

use core::fmt::{self, Write as _};
use core::str::FromStr;

use crate::measurement::Measurement;

pub const FAILURE_LINE: &str = "Failed to read from DHT sensor!";

/// Upper bound on a rendered line in bytes, terminator excluded.
///
/// The longest `{:.2}` rendering of an `f32` is 43 bytes, so two of them plus
/// the labels stay well below this.
pub const LINE_CAPACITY: usize = 128;

const TEMPERATURE_PREFIX: &str = "Temperature: ";
const SEPARATOR: &str = "°C  |  Humidity: ";
const HUMIDITY_SUFFIX: &str = "%";

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Report {
    Measurement(Measurement),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseReportError {
    #[error("line is not a report")]
    Unrecognized,
    #[error("report is missing the {0} field")]
    MissingField(&'static str),
    #[error("report has an invalid {0} value")]
    InvalidNumber(&'static str),
}

impl Report {
    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Failed)
    }

    pub fn to_line(&self) -> heapless::String<LINE_CAPACITY> {
        let mut line = heapless::String::new();
        // cannot overflow, see LINE_CAPACITY
        write!(line, "{self}").ok();
        line
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Measurement(m) => write!(
                f,
                "{TEMPERATURE_PREFIX}{:.2}{SEPARATOR}{:.2}{HUMIDITY_SUFFIX}",
                m.temperature_c, m.humidity_pct
            ),
            Report::Failed => f.write_str(FAILURE_LINE),
        }
    }
}

impl FromStr for Report {
    type Err = ParseReportError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == FAILURE_LINE {
            return Ok(Report::Failed);
        }

        let rest = line
            .strip_prefix(TEMPERATURE_PREFIX)
            .ok_or(ParseReportError::Unrecognized)?;
        let (temperature, humidity) = rest
            .split_once(SEPARATOR)
            .ok_or(ParseReportError::MissingField("humidity"))?;
        let humidity = humidity
            .strip_suffix(HUMIDITY_SUFFIX)
            .ok_or(ParseReportError::MissingField("humidity"))?;

        Ok(Report::Measurement(Measurement {
            temperature_c: parse_value(temperature, "temperature")?,
            humidity_pct: parse_value(humidity, "humidity")?,
        }))
    }
}

fn parse_value(text: &str, field: &'static str) -> Result<f32, ParseReportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseReportError::MissingField(field));
    }
    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseReportError::InvalidNumber(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(temperature_c: f32, humidity_pct: f32) -> Report {
        Report::Measurement(Measurement {
            temperature_c,
            humidity_pct,
        })
    }

    #[test]
    fn renders_two_decimals_with_units() {
        assert_eq!(
            measurement(21.5, 45.0).to_line().as_str(),
            "Temperature: 21.50°C  |  Humidity: 45.00%"
        );
        assert_eq!(
            measurement(-3.25, 100.0).to_line().as_str(),
            "Temperature: -3.25°C  |  Humidity: 100.00%"
        );
    }

    #[test]
    fn renders_failure_line() {
        assert_eq!(Report::Failed.to_line().as_str(), FAILURE_LINE);
    }

    #[test]
    fn extreme_values_fit_the_line_buffer() {
        let line = measurement(f32::MIN, f32::MIN).to_line();
        assert!(line.ends_with('%'));
        assert!(line.starts_with("Temperature: -3402823"));
    }

    #[test]
    fn parses_device_output() {
        assert_eq!(
            "Temperature: 21.60°C  |  Humidity: 45.20%\r\n".parse::<Report>(),
            Ok(measurement(21.6, 45.2))
        );
        assert_eq!(
            "Failed to read from DHT sensor!\r\n".parse::<Report>(),
            Ok(Report::Failed)
        );
    }

    #[test]
    fn rejects_noise() {
        assert_eq!(
            "ets Jun  8 2016 00:22:57".parse::<Report>(),
            Err(ParseReportError::Unrecognized)
        );
        assert_eq!(
            "Temperature: 21.60".parse::<Report>(),
            Err(ParseReportError::MissingField("humidity"))
        );
        assert_eq!(
            "Temperature: °C  |  Humidity: 45.20%".parse::<Report>(),
            Err(ParseReportError::MissingField("temperature"))
        );
        assert_eq!(
            "Temperature: nan°C  |  Humidity: 45.20%".parse::<Report>(),
            Err(ParseReportError::InvalidNumber("temperature"))
        );
        assert_eq!(
            "Temperature: 21.60°C  |  Humidity: wet%".parse::<Report>(),
            Err(ParseReportError::InvalidNumber("humidity"))
        );
    }
}
