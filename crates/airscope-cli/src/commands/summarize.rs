use airscope_core::{slice_quality, summarize};

pub struct SummarizeCommandConfig<'a> {
    pub file: &'a str,
    pub schema_path: Option<&'a str>,
    pub pollutant: &'a str,
    pub location: Option<&'a str>,
    pub last: &'a str,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: SummarizeCommandConfig<'_>) {
    let pollutant = super::parse_pollutant(cfg.pollutant);
    let range = super::parse_range(cfg.last);
    let (dataset, _schema) = super::load_dataset(cfg.file, cfg.schema_path);

    let slice = dataset.slice(cfg.location, range);
    let station = cfg.location.unwrap_or("all stations");

    let stats = match summarize(&slice, pollutant) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("No summary for {pollutant} at {station} ({range}): {e}");
            std::process::exit(1);
        }
    };

    println!("{pollutant} at {station} (range: {range}, {} rows)\n", slice.len());
    println!("  Mean         {:>10.2} µg/m³", stats.mean);
    println!("  Median       {:>10.2} µg/m³", stats.median);
    println!("  Min          {:>10.2} µg/m³", stats.min);
    println!("  Max          {:>10.2} µg/m³", stats.max);
    println!("  Std Dev      {:>10.2}", stats.std_dev);
    println!("  Data Points  {:>10}", stats.count);
    println!("  Completeness {:>9.1}%", stats.completeness * 100.0);

    // Quality panel covers every pollutant column of the slice.
    match slice_quality(&slice) {
        Ok(quality) => {
            println!();
            println!("Slice quality:");
            println!("  Completeness {:>9.1}%", quality.completeness * 100.0);
            println!("  Validity     {:>9.1}%", quality.validity * 100.0);
        }
        Err(e) => eprintln!("Slice quality unavailable: {e}"),
    }

    if let Some(path) = cfg.output_path {
        let json = match serde_json::to_string_pretty(&stats) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize summary: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Failed to write {path}: {e}");
            std::process::exit(1);
        }
        println!("\nSummary written to {path}");
    }
}
