pub mod alerts;
pub mod aqi;
pub mod correlate;
pub mod generate;
pub mod report;
pub mod scan;
pub mod summarize;

use std::path::Path;

use airscope_core::{
    AqiCategory, CoreError, CorrelationMatrix, Dataset, DatasetSchema, DatasetSlice, Pollutant,
    TimeRange, correlate, load_csv,
};

/// Load the schema (file or built-in default) and the dataset, exiting with
/// a message on failure. Commands only see a usable dataset.
pub fn load_dataset(file: &str, schema_path: Option<&str>) -> (Dataset, DatasetSchema) {
    let schema = match schema_path {
        Some(path) => match DatasetSchema::from_path(Path::new(path)) {
            Ok(schema) => schema,
            Err(e) => {
                eprintln!("Failed to load schema {path}: {e}");
                std::process::exit(1);
            }
        },
        None => DatasetSchema::default(),
    };

    match load_csv(Path::new(file), &schema) {
        Ok(dataset) => (dataset, schema),
        Err(e) => {
            eprintln!("Failed to load {file}: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse a `--last` flag. The clap value_parser already restricts the
/// strings, so a miss here is a programming error worth a hard exit.
pub fn parse_range(flag: &str) -> TimeRange {
    match TimeRange::from_flag(flag) {
        Some(range) => range,
        None => {
            eprintln!("Unknown time range '{flag}' (expected full, 24h, 7d, 30d)");
            std::process::exit(1);
        }
    }
}

/// Parse a pollutant name, exiting with the accepted spellings on a miss.
pub fn parse_pollutant(name: &str) -> Pollutant {
    match Pollutant::from_name(name) {
        Some(p) => p,
        None => {
            eprintln!("Unknown pollutant '{name}' (expected pm25, pm10, no2, o3, so2, co)");
            std::process::exit(1);
        }
    }
}

/// Parse a `--min-category` flag.
pub fn parse_category(name: &str) -> AqiCategory {
    match AqiCategory::from_name(name) {
        Some(c) => c,
        None => {
            eprintln!(
                "Unknown category '{name}' (expected good, moderate, sensitive, unhealthy, hazardous)"
            );
            std::process::exit(1);
        }
    }
}

/// Parse `--pollutants`: "all" means every column the slice carries.
pub fn parse_pollutant_list(flag: &str, available: &[Pollutant]) -> Vec<Pollutant> {
    if flag == "all" {
        return available.to_vec();
    }
    flag.split(',')
        .map(|name| parse_pollutant(name.trim()))
        .collect()
}

/// Correlate, dropping degenerate columns one at a time so the remaining
/// matrix still comes out. Returns the matrix plus whatever was dropped.
pub fn correlate_dropping_degenerate(
    slice: &DatasetSlice,
    mut selected: Vec<Pollutant>,
) -> Result<(CorrelationMatrix, Vec<Pollutant>), CoreError> {
    let mut dropped = Vec::new();
    loop {
        match correlate(slice, &selected) {
            Ok(matrix) => return Ok((matrix, dropped)),
            Err(CoreError::DegenerateColumn(p)) => {
                dropped.push(p);
                selected.retain(|&q| q != p);
                if selected.len() < 2 {
                    return Err(CoreError::InsufficientColumns(selected.len()));
                }
            }
            Err(e) => return Err(e),
        }
    }
}
