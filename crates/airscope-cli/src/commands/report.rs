use log::warn;
use serde::Serialize;

use airscope_core::{
    Alert, AlertConfig, CorrelationMatrix, DataQuality, Pollutant, StatsSummary, evaluate,
    slice_quality, summarize,
};

pub struct ReportCommandConfig<'a> {
    pub file: &'a str,
    pub schema_path: Option<&'a str>,
    pub location: Option<&'a str>,
    pub last: &'a str,
    pub output_path: Option<&'a str>,
}

#[derive(Serialize)]
struct CorrelationSection {
    matrix: CorrelationMatrix,
    /// Columns dropped for having no variance over co-present rows.
    dropped: Vec<Pollutant>,
}

#[derive(Serialize)]
struct Report<'a> {
    file: &'a str,
    location: Option<&'a str>,
    range: String,
    rows: usize,
    summaries: Vec<StatsSummary>,
    quality: Option<DataQuality>,
    correlation: Option<CorrelationSection>,
    alerts: Vec<Alert>,
}

pub fn run(cfg: ReportCommandConfig<'_>) {
    let range = super::parse_range(cfg.last);
    let (dataset, _schema) = super::load_dataset(cfg.file, cfg.schema_path);
    let slice = dataset.slice(cfg.location, range);

    if slice.is_empty() {
        eprintln!("No rows after filtering; nothing to report");
        std::process::exit(1);
    }

    let mut summaries = Vec::new();
    for pollutant in slice.pollutants() {
        match summarize(&slice, pollutant) {
            Ok(stats) => summaries.push(stats),
            Err(e) => warn!("no summary for {pollutant}: {e}"),
        }
    }

    let quality = match slice_quality(&slice) {
        Ok(quality) => Some(quality),
        Err(e) => {
            warn!("no quality panel: {e}");
            None
        }
    };

    let correlation = match super::correlate_dropping_degenerate(&slice, slice.pollutants()) {
        Ok((matrix, dropped)) => Some(CorrelationSection { matrix, dropped }),
        Err(e) => {
            warn!("no correlation matrix: {e}");
            None
        }
    };

    let alerts = match evaluate(&slice, &AlertConfig::default()) {
        Ok(alerts) => alerts,
        Err(e) => {
            warn!("no alert evaluation: {e}");
            Vec::new()
        }
    };

    let report = Report {
        file: cfg.file,
        location: cfg.location,
        range: range.to_string(),
        rows: slice.len(),
        summaries,
        quality,
        correlation,
        alerts,
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    };

    match cfg.output_path {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                eprintln!("Failed to write {path}: {e}");
                std::process::exit(1);
            }
            println!("Report written to {path}");
        }
        None => println!("{json}"),
    }
}
