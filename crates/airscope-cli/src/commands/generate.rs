use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Share of pollutant cells left blank so completeness is exercisable.
const MISSING_SHARE: f64 = 0.03;

/// Write a synthetic hourly dataset in the sample layout. Deterministic for
/// a given seed.
pub fn run(output: &str, rows: usize, seed: u64, locations: &str) {
    let stations: Vec<&str> = locations
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if stations.is_empty() {
        eprintln!("No station names given");
        std::process::exit(1);
    }

    let base = match NaiveDateTime::parse_from_str("2025-11-01 00:00:00", "%Y-%m-%d %H:%M:%S") {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Internal base timestamp is invalid: {e}");
            std::process::exit(1);
        }
    };

    let mut writer = match csv::Writer::from_path(output) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("Failed to open {output}: {e}");
            std::process::exit(1);
        }
    };

    let header = [
        "timestamp", "location", "pm25", "pm10", "no2", "o3", "so2", "co", "aqi",
    ];
    if let Err(e) = writer.write_record(header) {
        eprintln!("Failed to write header: {e}");
        std::process::exit(1);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let ranges: [(f64, f64); 6] = [
        (25.0, 70.0),  // pm25
        (40.0, 90.0),  // pm10
        (10.0, 60.0),  // no2
        (20.0, 60.0),  // o3
        (5.0, 40.0),   // so2
        (300.0, 900.0), // co
    ];

    for hour in 0..rows {
        let timestamp = (base + Duration::hours(hour as i64))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        for station in &stations {
            let mut record = vec![timestamp.clone(), (*station).to_string()];
            for &(lo, hi) in &ranges {
                if rng.random_bool(MISSING_SHARE) {
                    record.push(String::new());
                } else {
                    record.push(format!("{:.1}", rng.random_range(lo..hi)));
                }
            }
            record.push(rng.random_range(30..200).to_string());
            if let Err(e) = writer.write_record(&record) {
                eprintln!("Failed to write row: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = writer.flush() {
        eprintln!("Failed to flush {output}: {e}");
        std::process::exit(1);
    }

    println!(
        "Wrote {} rows ({} stations × {} hours) to {output}",
        rows * stations.len(),
        stations.len(),
        rows
    );
}
