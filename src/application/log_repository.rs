// Repository trait for daily log file access
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::error::EngineError;

/// Access to the directory of per-day log files.
///
/// Everything here is synchronous: an aggregation request owns its whole
/// scan, there are no suspension points inside the engine.
pub trait LogRepository: Send + Sync {
    /// Ordered list of daily files covering `[start.date, end.date]`,
    /// validated so the earliest and latest selected file match the window
    /// edges and no calendar day is missing in between.
    fn select_files(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<PathBuf>, EngineError>;

    /// The single file whose embedded date is nearest to `instant`, as long
    /// as it lies within the repository's lookup bound.
    fn closest_file(&self, instant: NaiveDateTime) -> Result<PathBuf, EngineError>;

    /// Raw lines of one daily file, header line included.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, EngineError>;
}
