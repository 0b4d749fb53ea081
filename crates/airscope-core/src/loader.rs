//! Schema-driven CSV ingestion.
//!
//! The loader is the deliberately forgiving boundary of the crate: cells that
//! fail to parse become missing readings and rows without a usable timestamp
//! are dropped (with a warning), while everything downstream of it signals
//! hard errors. Rows come out sorted by timestamp.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::error::LoadError;
use crate::schema::{ColumnRole, DatasetSchema, Pollutant};
use crate::slice::Dataset;

/// Load a dataset from a CSV file using an explicit schema.
///
/// Schema bindings other than the timestamp tolerate a missing header
/// column (the column is skipped with a warning); a missing timestamp
/// column is a [`LoadError::MissingColumn`].
pub fn load_csv(path: &Path, schema: &DatasetSchema) -> Result<Dataset, LoadError> {
    schema.validate()?;

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let index_of = |name: &str| headers.iter().position(|h| h == name);

    let ts_name = schema
        .timestamp_column()
        .ok_or_else(|| LoadError::Schema("no timestamp binding".to_string()))?;
    let ts_idx = index_of(ts_name).ok_or_else(|| LoadError::MissingColumn(ts_name.to_string()))?;

    let loc_idx = match schema.location_column() {
        Some(name) => match index_of(name) {
            Some(i) => Some(i),
            None => {
                warn!("location column '{name}' not in CSV header, loading without locations");
                None
            }
        },
        None => None,
    };

    let aqi_idx = match schema.aqi_column() {
        Some(name) => match index_of(name) {
            Some(i) => Some(i),
            None => {
                warn!("AQI column '{name}' not in CSV header, loading without AQI");
                None
            }
        },
        None => None,
    };

    let mut pollutant_cols: Vec<(Pollutant, usize)> = Vec::new();
    for binding in &schema.columns {
        if let ColumnRole::Pollutant(p) = binding.role {
            match index_of(&binding.name) {
                Some(i) => pollutant_cols.push((p, i)),
                None => warn!("pollutant column '{}' not in CSV header, skipped", binding.name),
            }
        }
    }

    // Row-major collection first; sorted and transposed below.
    struct RawRow {
        timestamp: NaiveDateTime,
        location: Option<String>,
        values: Vec<Option<f64>>,
        aqi: Option<f64>,
    }
    let mut rows: Vec<RawRow> = Vec::new();
    let mut dropped = 0usize;

    for (row_no, record) in reader.records().enumerate() {
        let record = record?;

        let ts_cell = record.get(ts_idx).unwrap_or("").trim();
        let Some(timestamp) = parse_timestamp(ts_cell, &schema.timestamp_format) else {
            warn!("row {row_no}: unparseable timestamp '{ts_cell}', row dropped");
            dropped += 1;
            continue;
        };

        let location = loc_idx.map(|i| record.get(i).unwrap_or("").trim().to_string());
        let values = pollutant_cols
            .iter()
            .map(|&(p, i)| parse_value(record.get(i).unwrap_or(""), row_no, &p.to_string()))
            .collect();
        let aqi = aqi_idx.and_then(|i| parse_value(record.get(i).unwrap_or(""), row_no, "aqi"));

        rows.push(RawRow {
            timestamp,
            location,
            values,
            aqi,
        });
    }

    if dropped > 0 {
        warn!("{dropped} row(s) dropped for unparseable timestamps");
    }

    rows.sort_by_key(|r| r.timestamp);

    let timestamps: Vec<NaiveDateTime> = rows.iter().map(|r| r.timestamp).collect();
    let locations: Option<Vec<String>> = loc_idx.map(|_| {
        rows.iter()
            .map(|r| r.location.clone().unwrap_or_default())
            .collect()
    });
    let mut columns: BTreeMap<Pollutant, Vec<Option<f64>>> = BTreeMap::new();
    for (col_no, &(p, _)) in pollutant_cols.iter().enumerate() {
        columns.insert(p, rows.iter().map(|r| r.values[col_no]).collect());
    }
    let aqi: Option<Vec<Option<f64>>> =
        aqi_idx.map(|_| rows.iter().map(|r| r.aqi).collect());

    Ok(Dataset::from_columns(timestamps, locations, columns, aqi))
}

/// Parse a timestamp cell: the configured format first, then the ISO-8601
/// `T` variant, then a bare date (midnight).
fn parse_timestamp(cell: &str, format: &str) -> Option<NaiveDateTime> {
    if cell.is_empty() {
        return None;
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(cell, format) {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S") {
        return Some(t);
    }
    if let Ok(d) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Parse a numeric cell. Empty → missing; non-numeric → missing, logged.
fn parse_value(cell: &str, row_no: usize, column: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!("row {row_no}: {column} cell '{cell}' is not a number, treated as missing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_sample_layout_with_default_schema() {
        let file = write_csv(
            "timestamp,location,pm25,pm10,no2,o3,so2,co,aqi\n\
             2025-11-01 02:00:00,Downtown,32.1,55.0,18.2,40.1,9.3,410.0,72\n\
             2025-11-01 00:00:00,Downtown,30.5,50.2,17.0,38.6,8.8,400.0,68\n\
             2025-11-01 01:00:00,Uptown,,48.0,16.1,35.2,8.1,390.0,\n",
        );
        let ds = load_csv(file.path(), &DatasetSchema::default()).unwrap();
        assert_eq!(ds.len(), 3);
        // Rows sorted by timestamp regardless of file order.
        let (first, last) = ds.time_span().unwrap();
        assert!(first < last);
        let slice = ds.slice(None, crate::slice::TimeRange::Full);
        let pm25 = slice.column(Pollutant::Pm25).unwrap();
        assert_eq!(pm25[0], Some(30.5));
        assert_eq!(pm25[1], None); // empty cell → missing
        assert_eq!(slice.aqi().unwrap()[1], None);
    }

    #[test]
    fn bad_timestamp_rows_are_dropped() {
        let file = write_csv(
            "timestamp,location,pm25,pm10,no2,o3,so2,co,aqi\n\
             not-a-time,Downtown,30.5,,,,,,\n\
             2025-11-01 00:00:00,Downtown,31.0,,,,,,\n",
        );
        let ds = load_csv(file.path(), &DatasetSchema::default()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn non_numeric_cell_becomes_missing() {
        let file = write_csv(
            "timestamp,location,pm25,pm10,no2,o3,so2,co,aqi\n\
             2025-11-01 00:00:00,Downtown,n/a,50.0,,,,,\n",
        );
        let ds = load_csv(file.path(), &DatasetSchema::default()).unwrap();
        let slice = ds.slice(None, crate::slice::TimeRange::Full);
        assert_eq!(slice.column(Pollutant::Pm25).unwrap()[0], None);
        assert_eq!(slice.column(Pollutant::Pm10).unwrap()[0], Some(50.0));
    }

    #[test]
    fn missing_timestamp_column_is_an_error() {
        let file = write_csv("time,pm25\n2025-11-01 00:00:00,30.5\n");
        let err = load_csv(file.path(), &DatasetSchema::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(name) if name == "timestamp"));
    }

    #[test]
    fn iso_and_date_only_timestamps_parse() {
        assert!(parse_timestamp("2025-11-01T06:00:00", "%Y-%m-%d %H:%M:%S").is_some());
        assert_eq!(
            parse_timestamp("2025-11-01", "%Y-%m-%d %H:%M:%S"),
            NaiveDate::from_ymd_opt(2025, 11, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        );
    }
}
