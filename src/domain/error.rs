// Engine error taxonomy
use chrono::{NaiveDate, NaiveDateTime};

/// Which end of the requested window a boundary check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEdge {
    Start,
    End,
}

impl std::fmt::Display for WindowEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowEdge::Start => write!(f, "start"),
            WindowEdge::End => write!(f, "end"),
        }
    }
}

/// Every failure the aggregation engine can report. All of these surface as
/// values from the entry points; a request either yields a total or one of
/// these, never a partial result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed date/time string or numeric field.
    #[error("cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// The selected files do not reach the requested window edge.
    #[error("no log file for the window {edge} {requested}, {edge}most file found covers {found}")]
    RangeBoundary {
        edge: WindowEdge,
        requested: NaiveDate,
        found: NaiveDate,
    },

    /// No file at all falls inside the requested window.
    #[error("no log files cover the window {start} to {end}")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },

    /// A calendar day is missing between the earliest and latest selected file.
    #[error("log files are not contiguous, at least one day is missing in [{}]", files.join(", "))]
    Gap { files: Vec<String> },

    /// No file close enough to a point lookup.
    #[error("no log file within {limit_days} day(s) of {requested}, nearest is {nearest_days:.2} day(s) away")]
    Lookup {
        requested: NaiveDateTime,
        nearest_days: f64,
        limit_days: f64,
    },

    /// The data directory holds no parsable daily log files.
    #[error("no daily log files found in {directory}")]
    NoFiles { directory: String },

    /// A point lookup landed on a file with no records.
    #[error("no readings in {path}")]
    NoReadings { path: String },

    /// The caller asked for a window that ends before it starts.
    #[error("window start {start} is after its end {end}")]
    InvertedWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_display_lists_files() {
        let err = EngineError::Gap {
            files: vec!["Data/2014_06_17.csv".to_string(), "Data/2014_06_19.csv".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Data/2014_06_17.csv"));
        assert!(msg.contains("Data/2014_06_19.csv"));
    }

    #[test]
    fn test_range_boundary_display_names_both_dates() {
        let err = EngineError::RangeBoundary {
            edge: WindowEdge::Start,
            requested: NaiveDate::from_ymd_opt(2014, 6, 16).unwrap(),
            found: NaiveDate::from_ymd_opt(2014, 6, 17).unwrap(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("start 2014-06-16"));
        assert!(msg.contains("2014-06-17"));
    }
}
