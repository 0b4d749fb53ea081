use airscope_core::{AlertConfig, evaluate};

pub struct AlertsCommandConfig<'a> {
    pub file: &'a str,
    pub schema_path: Option<&'a str>,
    pub location: Option<&'a str>,
    pub last: &'a str,
    pub min_category: &'a str,
}

pub fn run(cfg: AlertsCommandConfig<'_>) {
    let range = super::parse_range(cfg.last);
    let min_category = super::parse_category(cfg.min_category);
    let (dataset, _schema) = super::load_dataset(cfg.file, cfg.schema_path);
    let slice = dataset.slice(cfg.location, range);

    let config = AlertConfig {
        min_category,
        ..AlertConfig::default()
    };

    let alerts = match evaluate(&slice, &config) {
        Ok(alerts) => alerts,
        Err(e) => {
            eprintln!("Alert evaluation failed: {e}");
            std::process::exit(1);
        }
    };

    let station = cfg.location.unwrap_or("all stations");
    if alerts.is_empty() {
        println!(
            "No active alerts at {station} (range: {range}, minimum severity: {})",
            min_category.label()
        );
        return;
    }

    println!("{} active alert(s) at {station} (range: {range}):\n", alerts.len());
    for alert in &alerts {
        println!(
            "  \u{26A0} {}  [{}] {}",
            alert.timestamp.format("%Y-%m-%d %H:%M"),
            alert.severity.color(),
            alert.message
        );
    }
}
