use airscope_core::{TimeRange, categorize};

pub fn run(value: Option<f64>, file: Option<&str>, schema_path: Option<&str>) {
    match (value, file) {
        (Some(v), _) => categorize_value(v),
        (None, Some(path)) => categorize_latest(path, schema_path),
        (None, None) => {
            eprintln!("Pass --value to categorize a number, or --file for the latest readings");
            std::process::exit(1);
        }
    }
}

fn categorize_value(value: f64) {
    match categorize(value) {
        Ok(category) => {
            println!(
                "AQI {value:.0} → {} ({}, {})",
                category.label(),
                category.color(),
                category.hex()
            );
        }
        Err(e) => {
            eprintln!("Cannot categorize: {e}");
            std::process::exit(1);
        }
    }
}

/// Latest non-missing AQI reading per station, categorized.
fn categorize_latest(file: &str, schema_path: Option<&str>) {
    let (dataset, _schema) = super::load_dataset(file, schema_path);
    if !dataset.has_aqi() {
        eprintln!("Dataset has no AQI column bound; nothing to categorize");
        std::process::exit(1);
    }

    let locations = dataset.locations();
    let stations: Vec<Option<String>> = if locations.is_empty() {
        vec![None]
    } else {
        locations.into_iter().map(Some).collect()
    };

    println!("Current air quality:\n");
    for station in stations {
        let slice = dataset.slice(station.as_deref(), TimeRange::Full);
        let label = station.as_deref().unwrap_or("all stations");

        // Rows are sorted ascending, so scan from the back.
        let latest = slice.aqi().and_then(|col| {
            slice
                .timestamps()
                .iter()
                .zip(col.iter())
                .rev()
                .find_map(|(&t, v)| v.map(|aqi| (t, aqi)))
        });

        match latest {
            Some((timestamp, aqi)) => match categorize(aqi) {
                Ok(category) => println!(
                    "  {label:<16} AQI {aqi:>5.0}  {} ({}) at {}",
                    category.label(),
                    category.color(),
                    timestamp.format("%Y-%m-%d %H:%M")
                ),
                Err(e) => println!("  {label:<16} unusable AQI reading: {e}"),
            },
            None => println!("  {label:<16} no AQI readings"),
        }
    }
}
