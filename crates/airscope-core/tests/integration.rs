//! Integration tests for airscope-core.
//!
//! These run the full pipeline: CSV on disk → schema-driven load →
//! location/time filtering → statistics, correlation, quality, and alerts.

use std::io::Write;

use airscope_core::{
    AlertConfig, AqiCategory, CoreError, DatasetSchema, Pollutant, TimeRange, categorize,
    correlate, evaluate, load_csv, slice_quality, summarize,
};

/// Two stations, three hourly rows each. PM10 is exactly 2× PM2.5 so the
/// correlation is known; one PM2.5 cell is missing.
const SAMPLE_CSV: &str = "\
timestamp,location,pm25,pm10,no2,o3,so2,co,aqi
2025-11-01 00:00:00,Downtown,10.0,20.0,18.0,40.0,8.0,400.0,68
2025-11-01 01:00:00,Downtown,20.0,40.0,17.5,38.0,8.2,410.0,112
2025-11-01 02:00:00,Downtown,30.0,60.0,16.9,35.0,8.4,420.0,205
2025-11-01 00:00:00,Uptown,12.0,24.0,15.0,42.0,7.0,380.0,55
2025-11-01 01:00:00,Uptown,,28.0,14.2,41.0,7.1,385.0,60
2025-11-01 02:00:00,Uptown,16.0,32.0,13.8,40.0,7.2,390.0,64
";

fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    file
}

#[test]
fn load_then_summarize_one_station() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.locations(), vec!["Downtown", "Uptown"]);

    let slice = dataset.slice(Some("Downtown"), TimeRange::Full);
    let stats = summarize(&slice, Pollutant::Pm25).unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.mean - 20.0).abs() < 1e-12);
    assert!((stats.median - 20.0).abs() < 1e-12);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 30.0);
    assert!((stats.std_dev - 10.0).abs() < 1e-9);
    assert_eq!(stats.completeness, 1.0);
}

#[test]
fn missing_cells_lower_completeness() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    let slice = dataset.slice(Some("Uptown"), TimeRange::Full);

    let stats = summarize(&slice, Pollutant::Pm25).unwrap();
    assert_eq!(stats.count, 2);
    assert!((stats.completeness - 2.0 / 3.0).abs() < 1e-12);

    let quality = slice_quality(&slice).unwrap();
    assert!((quality.completeness - 17.0 / 18.0).abs() < 1e-12);
    assert_eq!(quality.validity, 1.0);
}

#[test]
fn linear_pollutants_correlate_perfectly() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    let slice = dataset.slice(Some("Downtown"), TimeRange::Full);

    let matrix = correlate(&slice, &[Pollutant::Pm25, Pollutant::Pm10]).unwrap();
    let r = matrix.get(Pollutant::Pm25, Pollutant::Pm10).unwrap();
    assert!((r - 1.0).abs() < 1e-9);
}

#[test]
fn correlation_across_all_columns() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    let slice = dataset.slice(None, TimeRange::Full);

    let pollutants = slice.pollutants();
    assert_eq!(pollutants.len(), 6);
    let matrix = correlate(&slice, &pollutants).unwrap();
    for &a in &pollutants {
        assert_eq!(matrix.get(a, a), Some(1.0));
        for &b in &pollutants {
            let r = matrix.get(a, b).unwrap();
            assert!(r.abs() <= 1.0 + 1e-9);
            assert_eq!(matrix.get(a, b), matrix.get(b, a));
        }
    }
}

#[test]
fn window_filter_feeds_stats() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    // Whole file spans two hours, so the 24h window keeps everything.
    let slice = dataset.slice(Some("Downtown"), TimeRange::Last24h);
    assert_eq!(slice.len(), 3);
}

#[test]
fn alerts_from_loaded_aqi_column() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    let slice = dataset.slice(Some("Downtown"), TimeRange::Full);

    let alerts = evaluate(&slice, &AlertConfig::default()).unwrap();
    // AQI 112 and 205 reach the default minimum severity.
    let aqi_alerts: Vec<_> = alerts
        .iter()
        .filter(|a| a.kind == airscope_core::AlertKind::AqiLevel)
        .collect();
    assert_eq!(aqi_alerts.len(), 2);
    assert_eq!(aqi_alerts[0].severity, AqiCategory::UnhealthySensitive);
    assert_eq!(aqi_alerts[1].severity, AqiCategory::Hazardous);
}

#[test]
fn categorizer_agrees_with_loaded_values() {
    assert_eq!(categorize(68.0), Ok(AqiCategory::Moderate));
    assert_eq!(categorize(205.0), Ok(AqiCategory::Hazardous));
    assert_eq!(categorize(50.0), Ok(AqiCategory::Good));
}

#[test]
fn empty_station_slice_signals_empty_input() {
    let file = sample_file();
    let dataset = load_csv(file.path(), &DatasetSchema::default()).unwrap();
    let slice = dataset.slice(Some("Suburban"), TimeRange::Full);
    assert!(slice.is_empty());
    assert_eq!(
        summarize(&slice, Pollutant::Pm25),
        Err(CoreError::EmptyInput)
    );
}

#[test]
fn schema_file_round_trips_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.json");
    DatasetSchema::default().to_path(&schema_path).unwrap();
    let schema = DatasetSchema::from_path(&schema_path).unwrap();

    let file = sample_file();
    let dataset = load_csv(file.path(), &schema).unwrap();
    assert_eq!(dataset.len(), 6);
}
