// Standalone degree-day query against a directory of daily logs
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use greenhouse_telemetry::application::degree_day_service::DegreeDayService;
use greenhouse_telemetry::domain::reading::Sensor;
use greenhouse_telemetry::domain::timestamp::normalize_delimiters;
use greenhouse_telemetry::infrastructure::flat_file_repository::{
    DEFAULT_LOOKUP_DISTANCE_DAYS, FlatFileRepository,
};

/// Accumulated degree-days above a base temperature over a window of daily
/// temperature logs.
#[derive(Parser)]
#[command(name = "degree-days", version)]
struct Args {
    /// Base temperature in degrees C
    threshold: f64,
    /// Window start, e.g. 2014_06_17 or 2014_06_17_09_55
    start: String,
    /// Window end; defaults to now
    end: Option<String>,
    /// Temperature column feeding the calculation: ambient or probe
    #[arg(long, default_value = "probe")]
    sensor: Sensor,
    /// Directory of daily log files
    #[arg(long, default_value = "Data")]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let repository = Arc::new(FlatFileRepository::new(
        args.data_dir,
        DEFAULT_LOOKUP_DISTANCE_DAYS,
    ));
    let service = DegreeDayService::new(repository);

    let start = normalize_delimiters(&args.start);
    let end = args.end.as_deref().map(normalize_delimiters);

    match service.degree_days_between(args.threshold, args.sensor, &start, end.as_deref()) {
        Ok(total) => {
            println!("{}", total);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
