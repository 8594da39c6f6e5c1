// Flat-file repository over a directory of per-day log files
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::application::log_repository::LogRepository;
use crate::domain::error::{EngineError, WindowEdge};
use crate::domain::timestamp::elapsed_days;

/// Furthest a file's embedded date may sit from a point lookup, in days.
pub const DEFAULT_LOOKUP_DISTANCE_DAYS: f64 = 1.0;

/// Reads daily logs named `YYYY_MM_DD[.ext]` from one directory.
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    data_dir: PathBuf,
    max_lookup_distance_days: f64,
}

impl FlatFileRepository {
    pub fn new(data_dir: PathBuf, max_lookup_distance_days: f64) -> Self {
        Self {
            data_dir,
            max_lookup_distance_days,
        }
    }

    /// Every parsable daily file, sorted by its embedded date. Sorting the
    /// parsed dates (rather than the raw paths) keeps the chronological
    /// order independent of extensions or directory prefixes.
    fn dated_entries(&self) -> Result<Vec<(NaiveDate, PathBuf)>, EngineError> {
        let directory = std::fs::read_dir(&self.data_dir).map_err(|source| EngineError::Io {
            path: self.data_dir.display().to_string(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in directory {
            let entry = entry.map_err(|source| EngineError::Io {
                path: self.data_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            match embedded_date(&path) {
                Some(date) => entries.push((date, path)),
                None => {
                    tracing::debug!("ignoring {}: no embedded date in file name", path.display());
                }
            }
        }
        entries.sort_by_key(|(date, _)| *date);
        Ok(entries)
    }
}

impl LogRepository for FlatFileRepository {
    fn select_files(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<PathBuf>, EngineError> {
        let start_day = start.date();
        let end_day = end.date();

        let selected: Vec<(NaiveDate, PathBuf)> = self
            .dated_entries()?
            .into_iter()
            .filter(|(date, _)| (start_day..=end_day).contains(date))
            .collect();

        let (Some((first_day, _)), Some((last_day, _))) = (selected.first(), selected.last())
        else {
            return Err(EngineError::EmptyWindow {
                start: start_day,
                end: end_day,
            });
        };

        if *first_day != start_day {
            return Err(EngineError::RangeBoundary {
                edge: WindowEdge::Start,
                requested: start_day,
                found: *first_day,
            });
        }
        if *last_day != end_day {
            return Err(EngineError::RangeBoundary {
                edge: WindowEdge::End,
                requested: end_day,
                found: *last_day,
            });
        }

        for pair in selected.windows(2) {
            if pair[0].0.succ_opt() != Some(pair[1].0) {
                return Err(EngineError::Gap {
                    files: selected
                        .iter()
                        .map(|(_, path)| path.display().to_string())
                        .collect(),
                });
            }
        }

        Ok(selected.into_iter().map(|(_, path)| path).collect())
    }

    fn closest_file(&self, instant: NaiveDateTime) -> Result<PathBuf, EngineError> {
        let nearest = self
            .dated_entries()?
            .into_iter()
            .map(|(date, path)| {
                let midnight = date.and_time(NaiveTime::MIN);
                (elapsed_days(midnight, instant).abs(), path)
            })
            .min_by(|left, right| left.0.total_cmp(&right.0));

        match nearest {
            Some((distance, path)) if distance <= self.max_lookup_distance_days => Ok(path),
            Some((distance, _)) => Err(EngineError::Lookup {
                requested: instant,
                nearest_days: distance,
                limit_days: self.max_lookup_distance_days,
            }),
            None => Err(EngineError::NoFiles {
                directory: self.data_dir.display().to_string(),
            }),
        }
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>, EngineError> {
        let file = File::open(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| EngineError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

/// `Data/2014_06_19.csv` embeds 2014-06-19; extra stem segments are ignored.
fn embedded_date(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let mut fields = stem.split('_');
    let year: i32 = fields.next()?.parse().ok()?;
    let month: u32 = fields.next()?.parse().ok()?;
    let day: u32 = fields.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
