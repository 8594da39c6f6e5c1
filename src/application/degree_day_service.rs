// Degree-day service - Use case for thermal exposure queries
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::application::log_repository::LogRepository;
use crate::domain::error::EngineError;
use crate::domain::reading::{HEADER_TOKEN, Reading, Sensor};
use crate::domain::timestamp::{elapsed_days, parse_timestamp};

#[derive(Clone)]
pub struct DegreeDayService {
    repository: Arc<dyn LogRepository>,
}

impl DegreeDayService {
    pub fn new(repository: Arc<dyn LogRepository>) -> Self {
        Self { repository }
    }

    /// Accumulated degree-days above `threshold` between two date-time
    /// strings (`YYYY_MM_DD[_HH[_MM]]`). A missing or empty end string means
    /// "now". This is the whole entry contract: a float or a descriptive
    /// error, never a partial total.
    pub fn degree_days_between(
        &self,
        threshold: f64,
        sensor: Sensor,
        start: &str,
        end: Option<&str>,
    ) -> Result<f64, EngineError> {
        let start_stamp = parse_timestamp(start)?;
        let end_stamp = match end {
            Some(text) if !text.trim().is_empty() => parse_timestamp(text)?,
            _ => Local::now().naive_local(),
        };
        if end_stamp < start_stamp {
            return Err(EngineError::InvertedWindow {
                start: start_stamp,
                end: end_stamp,
            });
        }

        let files = self.repository.select_files(start_stamp, end_stamp)?;
        tracing::debug!(
            "integrating {} file(s) between {} and {}",
            files.len(),
            start_stamp,
            end_stamp
        );
        self.integrate(threshold, sensor, start_stamp, end_stamp, &files)
    }

    /// The reading nearest to a point in time, taken from the closest daily
    /// file.
    pub fn temperature_at(&self, sensor: Sensor, when: &str) -> Result<f64, EngineError> {
        let instant = parse_timestamp(when)?;
        let path = self.repository.closest_file(instant)?;

        let mut nearest: Option<(f64, f64)> = None;
        for line in self.repository.read_lines(&path)? {
            if line.contains(HEADER_TOKEN) {
                continue;
            }
            let reading = Reading::parse(&line)?;
            let distance = elapsed_days(reading.timestamp, instant).abs();
            if nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, reading.value(sensor)));
            }
        }

        nearest
            .map(|(_, value)| value)
            .ok_or_else(|| EngineError::NoReadings {
                path: path.display().to_string(),
            })
    }

    /// Stepwise integration of (reading − threshold) over elapsed time.
    ///
    /// Files must arrive in chronological order: the first record past `end`
    /// stops the entire remaining stream, later files are never opened.
    fn integrate(
        &self,
        threshold: f64,
        sensor: Sensor,
        start: NaiveDateTime,
        end: NaiveDateTime,
        files: &[std::path::PathBuf],
    ) -> Result<f64, EngineError> {
        let mut degree_days = 0.0;
        let mut previous: Option<NaiveDateTime> = None;

        'stream: for path in files {
            for line in self.repository.read_lines(path)? {
                if line.contains(HEADER_TOKEN) {
                    continue;
                }
                let stamp = Reading::line_timestamp(&line)?;
                if stamp < start {
                    continue;
                }
                if stamp > end {
                    break 'stream;
                }
                if let Some(previous_stamp) = previous {
                    let reading = Reading::parse(&line)?;
                    let excess = reading.value(sensor) - threshold;
                    if excess > 0.0 {
                        degree_days += excess * elapsed_days(previous_stamp, stamp);
                    }
                }
                // The first in-range record only seeds the previous stamp.
                previous = Some(stamp);
            }
        }

        Ok(degree_days)
    }
}
