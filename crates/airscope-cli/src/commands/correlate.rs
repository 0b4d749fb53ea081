use airscope_core::Pollutant;

/// Pairs at or above this |r| are called out as strongly coupled.
const STRONG_CORRELATION: f64 = 0.7;

pub struct CorrelateCommandConfig<'a> {
    pub file: &'a str,
    pub schema_path: Option<&'a str>,
    pub pollutants: &'a str,
    pub location: Option<&'a str>,
    pub last: &'a str,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: CorrelateCommandConfig<'_>) {
    let range = super::parse_range(cfg.last);
    let (dataset, _schema) = super::load_dataset(cfg.file, cfg.schema_path);
    let slice = dataset.slice(cfg.location, range);

    let selected = super::parse_pollutant_list(cfg.pollutants, &slice.pollutants());
    let (matrix, dropped) = match super::correlate_dropping_degenerate(&slice, selected) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Correlation failed: {e}");
            std::process::exit(1);
        }
    };

    let station = cfg.location.unwrap_or("all stations");
    println!(
        "Pollutant correlations at {station} (range: {range}, {} rows)\n",
        slice.len()
    );

    print!("{:>8}", "");
    for &p in matrix.pollutants() {
        print!("{:>8}", p.to_string());
    }
    println!();
    for &a in matrix.pollutants() {
        print!("{:>8}", a.to_string());
        for &b in matrix.pollutants() {
            match matrix.get(a, b) {
                Some(r) => print!("{r:>8.2}"),
                None => print!("{:>8}", "-"),
            }
        }
        println!();
    }

    if !dropped.is_empty() {
        println!(
            "\nDropped (no variance over co-present rows): {}",
            joined(&dropped)
        );
    }

    let pollutants = matrix.pollutants();
    let mut strong = Vec::new();
    for (i, &a) in pollutants.iter().enumerate() {
        for &b in &pollutants[i + 1..] {
            if let Some(r) = matrix.get(a, b) {
                if r.abs() >= STRONG_CORRELATION {
                    strong.push((a, b, r));
                }
            }
        }
    }
    if !strong.is_empty() {
        println!("\nStrongly coupled pairs (|r| >= {STRONG_CORRELATION}):");
        for (a, b, r) in strong {
            println!("  {a} / {b}: {r:.2}");
        }
    }

    if let Some(path) = cfg.output_path {
        let json = match serde_json::to_string_pretty(&matrix) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize matrix: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Failed to write {path}: {e}");
            std::process::exit(1);
        }
        println!("\nMatrix written to {path}");
    }
}

fn joined(pollutants: &[Pollutant]) -> String {
    pollutants
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
