use airscope_core::{ColumnRole, TimeRange};

pub fn run(file: &str, schema_path: Option<&str>) {
    let (dataset, schema) = super::load_dataset(file, schema_path);

    println!("Dataset: {file} ({} rows)", dataset.len());
    println!();

    println!("Bound columns:");
    for binding in &schema.columns {
        let role = match &binding.role {
            ColumnRole::Timestamp => "timestamp".to_string(),
            ColumnRole::Location => "location".to_string(),
            ColumnRole::Aqi => "aqi".to_string(),
            ColumnRole::Pollutant(p) => format!("pollutant ({p})"),
            ColumnRole::Ignore => "ignored".to_string(),
        };
        println!("  {:<16} {}", binding.name, role);
    }

    if let Some((first, last)) = dataset.time_span() {
        println!();
        println!(
            "Time span: {} → {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }

    let locations = dataset.locations();
    if !locations.is_empty() {
        println!();
        println!("Stations ({}):", locations.len());
        for loc in &locations {
            let rows = dataset.slice(Some(loc), TimeRange::Full).len();
            println!("  \u{1F4CD} {loc:<16} {rows} rows");
        }
    }

    let slice = dataset.slice(None, TimeRange::Full);
    if !slice.is_empty() {
        println!();
        println!("Readings per pollutant:");
        for pollutant in slice.pollutants() {
            let column = slice.column(pollutant).unwrap_or(&[]);
            let present = column.iter().filter(|v| v.is_some()).count();
            let missing = column.len() - present;
            println!("  {pollutant:<8} {present} present, {missing} missing");
        }
    }
}
