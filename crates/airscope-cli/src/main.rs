//! CLI for airscope — explore air-quality CSVs from the terminal.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "airscope")]
#[command(about = "airscope — explore air-quality CSVs from the terminal")]
#[command(version = airscope_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inventory a dataset: bound columns, rows, time span, stations
    Scan {
        /// CSV file to inspect
        #[arg(long)]
        file: String,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Statistical summary for one pollutant: mean, median, min, max,
    /// std dev, count, completeness, validity
    Summarize {
        /// CSV file to analyze
        #[arg(long)]
        file: String,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,

        /// Pollutant column (pm25, pm10, no2, o3, so2, co)
        #[arg(long)]
        pollutant: String,

        /// Station filter (default: all stations)
        #[arg(long)]
        location: Option<String>,

        /// Trailing time window
        #[arg(long, default_value = "full", value_parser = ["full", "24h", "7d", "30d"])]
        last: String,

        /// Write the summary as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Pairwise Pearson correlation matrix across pollutants
    Correlate {
        /// CSV file to analyze
        #[arg(long)]
        file: String,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,

        /// Comma-separated pollutant list, or "all"
        #[arg(long, default_value = "all")]
        pollutants: String,

        /// Station filter (default: all stations)
        #[arg(long)]
        location: Option<String>,

        /// Trailing time window
        #[arg(long, default_value = "full", value_parser = ["full", "24h", "7d", "30d"])]
        last: String,

        /// Write the matrix as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Categorize an AQI value, or the latest reading per station
    Aqi {
        /// Literal AQI value to categorize
        #[arg(long)]
        value: Option<f64>,

        /// CSV file: categorize the latest AQI reading per station
        #[arg(long)]
        file: Option<String>,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Evaluate alert rules and list active alerts
    Alerts {
        /// CSV file to analyze
        #[arg(long)]
        file: String,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,

        /// Station filter (default: all stations)
        #[arg(long)]
        location: Option<String>,

        /// Trailing time window
        #[arg(long, default_value = "full", value_parser = ["full", "24h", "7d", "30d"])]
        last: String,

        /// Lowest AQI severity that raises an alert
        #[arg(long, default_value = "sensitive", value_parser = ["good", "moderate", "sensitive", "unhealthy", "hazardous"])]
        min_category: String,
    },

    /// Full machine-readable report: summaries, correlations, quality, alerts
    Report {
        /// CSV file to analyze
        #[arg(long)]
        file: String,

        /// Schema JSON (default: built-in sample layout)
        #[arg(long)]
        schema: Option<String>,

        /// Station filter (default: all stations)
        #[arg(long)]
        location: Option<String>,

        /// Trailing time window
        #[arg(long, default_value = "full", value_parser = ["full", "24h", "7d", "30d"])]
        last: String,

        /// Output path for the JSON report (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Write a synthetic sample dataset (deterministic per seed)
    Generate {
        /// Output CSV path
        #[arg(long, default_value = "air_quality_data.csv")]
        output: String,

        /// Hourly rows per station
        #[arg(long, default_value = "168")]
        rows: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Comma-separated station names
        #[arg(long, default_value = "Downtown,Uptown,Suburban,Industrial")]
        locations: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { file, schema } => commands::scan::run(&file, schema.as_deref()),
        Commands::Summarize {
            file,
            schema,
            pollutant,
            location,
            last,
            output,
        } => commands::summarize::run(commands::summarize::SummarizeCommandConfig {
            file: &file,
            schema_path: schema.as_deref(),
            pollutant: &pollutant,
            location: location.as_deref(),
            last: &last,
            output_path: output.as_deref(),
        }),
        Commands::Correlate {
            file,
            schema,
            pollutants,
            location,
            last,
            output,
        } => commands::correlate::run(commands::correlate::CorrelateCommandConfig {
            file: &file,
            schema_path: schema.as_deref(),
            pollutants: &pollutants,
            location: location.as_deref(),
            last: &last,
            output_path: output.as_deref(),
        }),
        Commands::Aqi {
            value,
            file,
            schema,
        } => commands::aqi::run(value, file.as_deref(), schema.as_deref()),
        Commands::Alerts {
            file,
            schema,
            location,
            last,
            min_category,
        } => commands::alerts::run(commands::alerts::AlertsCommandConfig {
            file: &file,
            schema_path: schema.as_deref(),
            location: location.as_deref(),
            last: &last,
            min_category: &min_category,
        }),
        Commands::Report {
            file,
            schema,
            location,
            last,
            output,
        } => commands::report::run(commands::report::ReportCommandConfig {
            file: &file,
            schema_path: schema.as_deref(),
            location: location.as_deref(),
            last: &last,
            output_path: output.as_deref(),
        }),
        Commands::Generate {
            output,
            rows,
            seed,
            locations,
        } => commands::generate::run(&output, rows, seed, &locations),
    }
}
