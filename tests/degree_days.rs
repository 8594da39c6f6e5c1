// End-to-end aggregation runs against real files on disk
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use greenhouse_telemetry::application::degree_day_service::DegreeDayService;
use greenhouse_telemetry::domain::error::{EngineError, WindowEdge};
use greenhouse_telemetry::domain::reading::Sensor;
use greenhouse_telemetry::infrastructure::flat_file_repository::{
    DEFAULT_LOOKUP_DISTANCE_DAYS, FlatFileRepository,
};

const HEADER: &str = "Epoch,Date-Time,T1_C,T2_C,H_pct";

fn write_log(dir: &TempDir, name: &str, lines: &[&str]) {
    let mut file = File::create(dir.path().join(name)).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

fn service_for(dir: &TempDir) -> DegreeDayService {
    let repository = Arc::new(FlatFileRepository::new(
        dir.path().to_path_buf(),
        DEFAULT_LOOKUP_DISTANCE_DAYS,
    ));
    DegreeDayService::new(repository)
}

/// Three contiguous days, two records each, twelve hours apart.
fn three_day_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_log(
        &dir,
        "2014_06_17.csv",
        &[
            "1403000000.0,2014_06_17_00_00,18.0,21.0,50.1",
            "1403043200.0,2014_06_17_12_00,19.0,23.0,49.2",
        ],
    );
    write_log(
        &dir,
        "2014_06_18.csv",
        &[
            "1403086400.0,2014_06_18_00_00,18.0,19.0,51.7",
            "1403129600.0,2014_06_18_12_00,21.0,26.0,48.8",
        ],
    );
    write_log(
        &dir,
        "2014_06_19.csv",
        &["1403172800.0,2014_06_19_00_00,20.0,22.0,50.0"],
    );
    dir
}

#[test]
fn full_window_probe_total() {
    let dir = three_day_fixture();
    let total = service_for(&dir)
        .degree_days_between(20.0, Sensor::Probe, "2014_06_17", Some("2014_06_19_23_59"))
        .unwrap();

    // Half-day steps: (23-20) + 0 + (26-20) + (22-20), each times 0.5.
    assert!((total - 5.5).abs() < 1e-12);
}

#[test]
fn full_window_ambient_total() {
    let dir = three_day_fixture();
    let total = service_for(&dir)
        .degree_days_between(18.0, Sensor::Ambient, "2014_06_17", Some("2014_06_19_23_59"))
        .unwrap();

    assert!((total - 3.0).abs() < 1e-12);
}

#[test]
fn repeated_runs_are_bit_for_bit_identical() {
    let dir = three_day_fixture();
    let service = service_for(&dir);

    let first = service
        .degree_days_between(20.0, Sensor::Probe, "2014_06_17", Some("2014_06_19_23_59"))
        .unwrap();
    let second = service
        .degree_days_between(20.0, Sensor::Probe, "2014_06_17", Some("2014_06_19_23_59"))
        .unwrap();

    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn raising_the_threshold_never_raises_the_total() {
    let dir = three_day_fixture();
    let service = service_for(&dir);

    let mut previous = f64::INFINITY;
    for threshold in [15.0, 18.0, 20.0, 22.0, 25.0, 30.0] {
        let total = service
            .degree_days_between(threshold, Sensor::Probe, "2014_06_17", Some("2014_06_19_23_59"))
            .unwrap();
        assert!(total <= previous, "threshold {} raised the total", threshold);
        previous = total;
    }
}

#[test]
fn zero_width_window_yields_zero() {
    let dir = three_day_fixture();
    let total = service_for(&dir)
        .degree_days_between(
            20.0,
            Sensor::Probe,
            "2014_06_17_12_00",
            Some("2014_06_17_12_00"),
        )
        .unwrap();
    assert_eq!(total, 0.0);
}

#[test]
fn window_start_before_first_file_is_a_boundary_error() {
    let dir = three_day_fixture();
    let err = service_for(&dir)
        .degree_days_between(20.0, Sensor::Probe, "2014_06_16", Some("2014_06_19"))
        .unwrap_err();

    match err {
        EngineError::RangeBoundary { edge, requested, found } => {
            assert_eq!(edge, WindowEdge::Start);
            assert_eq!(requested.to_string(), "2014-06-16");
            assert_eq!(found.to_string(), "2014-06-17");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn missing_day_in_the_middle_is_a_gap_error() {
    let dir = TempDir::new().unwrap();
    write_log(
        &dir,
        "2014_06_17.csv",
        &["1403000000.0,2014_06_17_00_00,18.0,21.0,50.1"],
    );
    write_log(
        &dir,
        "2014_06_19.csv",
        &["1403172800.0,2014_06_19_00_00,20.0,22.0,50.0"],
    );

    let err = service_for(&dir)
        .degree_days_between(20.0, Sensor::Probe, "2014_06_17", Some("2014_06_19"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Gap { .. }));
}

#[test]
fn omitted_end_means_now() {
    // With no end string the window runs to the present, far past the
    // fixture's last file, so the end boundary check has to fire.
    let dir = three_day_fixture();
    let err = service_for(&dir)
        .degree_days_between(20.0, Sensor::Probe, "2014_06_17", None)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::RangeBoundary { edge: WindowEdge::End, .. }
    ));
}

#[test]
fn point_lookup_returns_the_nearest_reading() {
    let dir = three_day_fixture();
    let value = service_for(&dir)
        .temperature_at(Sensor::Probe, "2014_06_18_11_00")
        .unwrap();
    assert_eq!(value, 26.0);
}

#[test]
fn point_lookup_far_from_any_file_fails() {
    let dir = three_day_fixture();
    let err = service_for(&dir)
        .temperature_at(Sensor::Probe, "2015_01_01")
        .unwrap_err();
    assert!(matches!(err, EngineError::Lookup { .. }));
}
