// One record of a daily temperature log
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::error::EngineError;
use crate::domain::timestamp::parse_timestamp;

/// Token that marks a file's header line. Detection is by content, not line
/// number, so a file whose header only appears on line one still works.
pub const HEADER_TOKEN: &str = "Epoch";

/// Which of the two temperature columns feeds a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensor {
    Ambient,
    Probe,
}

impl std::str::FromStr for Sensor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambient" => Ok(Sensor::Ambient),
            "probe" => Ok(Sensor::Probe),
            other => Err(EngineError::parse(other, "expected 'ambient' or 'probe'")),
        }
    }
}

/// A parsed log line:
/// `1403121302.3,2014_06_18_09_55,26.7,23.500,43.8`
/// (epoch seconds, timestamp, ambient °C, probe °C, relative humidity %).
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub epoch: f64,
    pub timestamp: NaiveDateTime,
    pub ambient_c: f64,
    pub probe_c: f64,
    pub humidity_pct: f64,
}

impl Reading {
    pub fn parse(line: &str) -> Result<Self, EngineError> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 5 {
            return Err(EngineError::parse(
                line.trim(),
                format!("expected 5 comma-separated fields, got {}", fields.len()),
            ));
        }
        Ok(Self {
            epoch: float_field(line, fields[0])?,
            timestamp: parse_timestamp(fields[1])?,
            ambient_c: float_field(line, fields[2])?,
            probe_c: float_field(line, fields[3])?,
            humidity_pct: float_field(line, fields[4])?,
        })
    }

    /// Timestamp of a log line without paying for the full record parse.
    pub fn line_timestamp(line: &str) -> Result<NaiveDateTime, EngineError> {
        let field = line
            .trim()
            .split(',')
            .nth(1)
            .ok_or_else(|| EngineError::parse(line.trim(), "missing date-time field"))?;
        parse_timestamp(field)
    }

    pub fn value(&self, sensor: Sensor) -> f64 {
        match sensor {
            Sensor::Ambient => self.ambient_c,
            Sensor::Probe => self.probe_c,
        }
    }
}

fn float_field(line: &str, field: &str) -> Result<f64, EngineError> {
    field
        .parse()
        .map_err(|_| EngineError::parse(line.trim(), format!("'{}' is not a number", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "1403121302.3,2014_06_18_09_55,26.7,23.500,43.8";

    #[test]
    fn test_parse_line() {
        let reading = Reading::parse(LINE).unwrap();
        assert_eq!(reading.timestamp, parse_timestamp("2014_06_18_09_55").unwrap());
        assert_eq!(reading.ambient_c, 26.7);
        assert_eq!(reading.probe_c, 23.5);
        assert_eq!(reading.humidity_pct, 43.8);
    }

    #[test]
    fn test_sensor_selects_column() {
        let reading = Reading::parse(LINE).unwrap();
        assert_eq!(reading.value(Sensor::Ambient), 26.7);
        assert_eq!(reading.value(Sensor::Probe), 23.5);
    }

    #[test]
    fn test_line_timestamp_only() {
        // The trailing garbage never gets parsed as a number
        let stamp = Reading::line_timestamp("oops,2014_06_18_09_55,bad,bad,bad").unwrap();
        assert_eq!(stamp, parse_timestamp("2014_06_18_09_55").unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_number() {
        assert!(Reading::parse("1403121302.3,2014_06_18_09_55,hot,23.5,43.8").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(Reading::parse("2014_06_18_09_55,26.7,23.5").is_err());
    }

    #[test]
    fn test_sensor_from_str() {
        assert_eq!("probe".parse::<Sensor>().unwrap(), Sensor::Probe);
        assert_eq!("Ambient".parse::<Sensor>().unwrap(), Sensor::Ambient);
        assert!("basking".parse::<Sensor>().is_err());
    }
}
