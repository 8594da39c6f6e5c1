// Underscore-delimited calendar timestamps, minute precision
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::error::EngineError;

/// Parse a string like `2014_12_31` into a naive timestamp.
///
/// The string may include hours and minutes, e.g. `2014_12_31_09_55`; both
/// default to zero. Anything past the fifth field is ignored. Fewer than
/// three fields, a non-integer field, or an impossible calendar combination
/// is a `Parse` error rather than a silent wrap.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, EngineError> {
    let fields: Vec<&str> = input.trim().split('_').collect();
    if fields.len() < 3 {
        return Err(EngineError::parse(
            input,
            "expected at least year, month and day fields",
        ));
    }

    let year = int_field::<i32>(input, fields[0])?;
    let month = int_field::<u32>(input, fields[1])?;
    let day = int_field::<u32>(input, fields[2])?;
    let hour = if fields.len() > 3 {
        int_field::<u32>(input, fields[3])?
    } else {
        0
    };
    let minute = if fields.len() > 4 {
        int_field::<u32>(input, fields[4])?
    } else {
        0
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::parse(input, "not a valid calendar date"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| EngineError::parse(input, "not a valid time of day"))?;
    Ok(NaiveDateTime::new(date, time))
}

/// True elapsed duration between two timestamps, in fractional days.
pub fn elapsed_days(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 86_400.0
}

/// Boundary helper: callers accept `2014-06-18 09:55` and friends, the
/// engine only ever sees underscores.
pub fn normalize_delimiters(input: &str) -> String {
    input.trim().replace(['-', ' ', ':'], "_")
}

fn int_field<T: std::str::FromStr>(input: &str, field: &str) -> Result<T, EngineError> {
    field
        .parse()
        .map_err(|_| EngineError::parse(input, format!("'{}' is not an integer", field)))
}
