//! Threshold-based alert evaluation over a slice.
//!
//! Two rule families: AQI observations at or above a minimum severity, and
//! pollutant observations above a configured guideline limit. Evaluation is
//! a pure pass over the slice; the caller renders or dispatches the alerts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::aqi::{AqiCategory, categorize};
use crate::error::CoreError;
use crate::schema::Pollutant;
use crate::slice::DatasetSlice;

/// WHO 24-hour guideline used for the default PM2.5 limit, in µg/m³.
pub const WHO_PM25_LIMIT: f64 = 50.0;

/// Alert rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Lowest AQI severity that raises an alert.
    pub min_category: AqiCategory,
    /// Per-pollutant concentration limits in µg/m³.
    pub limits: BTreeMap<Pollutant, f64>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        let mut limits = BTreeMap::new();
        limits.insert(Pollutant::Pm25, WHO_PM25_LIMIT);
        Self {
            min_category: AqiCategory::UnhealthySensitive,
            limits,
        }
    }
}

/// What triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// An AQI observation reached the configured severity.
    AqiLevel,
    /// A pollutant observation exceeded its guideline limit.
    GuidelineExceedance,
}

/// One active alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub timestamp: NaiveDateTime,
    pub kind: AlertKind,
    pub severity: AqiCategory,
    pub message: String,
}

/// Evaluate the alert rules over a slice. Alerts come back ordered by
/// timestamp.
///
/// A slice without an AQI column simply produces no AQI-level alerts; an
/// empty slice is [`CoreError::EmptyInput`]; an invalid AQI observation is
/// [`CoreError::InvalidValue`].
pub fn evaluate(slice: &DatasetSlice, config: &AlertConfig) -> Result<Vec<Alert>, CoreError> {
    if slice.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut alerts = Vec::new();

    if let Some(aqi_col) = slice.aqi() {
        for (&timestamp, value) in slice.timestamps().iter().zip(aqi_col.iter()) {
            let Some(aqi) = *value else { continue };
            let severity = categorize(aqi)?;
            if severity >= config.min_category {
                alerts.push(Alert {
                    timestamp,
                    kind: AlertKind::AqiLevel,
                    severity,
                    message: format!("AQI {aqi:.0} — {}", severity.label()),
                });
            }
        }
    }

    for (&pollutant, &limit) in &config.limits {
        let Some(column) = slice.column(pollutant) else {
            continue;
        };
        for (row, (&timestamp, value)) in
            slice.timestamps().iter().zip(column.iter()).enumerate()
        {
            let Some(concentration) = *value else { continue };
            if concentration <= limit {
                continue;
            }
            // Severity from the same row's AQI reading when there is one.
            let severity = match slice.aqi().and_then(|col| col[row]) {
                Some(aqi) => categorize(aqi)?,
                None => AqiCategory::Moderate,
            };
            alerts.push(Alert {
                timestamp,
                kind: AlertKind::GuidelineExceedance,
                severity,
                message: format!(
                    "{pollutant} at {concentration:.1} µg/m³ exceeds guideline {limit:.1} µg/m³"
                ),
            });
        }
    }

    alerts.sort_by_key(|a| a.timestamp);
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(h: i64) -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-11-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
            + Duration::hours(h)
    }

    fn slice_with_aqi(aqi: Vec<Option<f64>>, pm25: Vec<Option<f64>>) -> DatasetSlice {
        let timestamps = (0..aqi.len() as i64).map(ts).collect();
        let mut columns = BTreeMap::new();
        columns.insert(Pollutant::Pm25, pm25);
        DatasetSlice::from_columns(None, timestamps, columns, Some(aqi))
    }

    #[test]
    fn aqi_alerts_respect_min_category() {
        let slice = slice_with_aqi(
            vec![Some(40.0), Some(120.0), Some(210.0)],
            vec![None, None, None],
        );
        let alerts = evaluate(&slice, &AlertConfig::default()).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, AqiCategory::UnhealthySensitive);
        assert_eq!(alerts[1].severity, AqiCategory::Hazardous);
        assert!(alerts.iter().all(|a| a.kind == AlertKind::AqiLevel));
    }

    #[test]
    fn exceedance_alerts_use_row_aqi_severity() {
        let slice = slice_with_aqi(
            vec![Some(180.0), None],
            vec![Some(72.3), Some(80.0)], // both above the 50 µg/m³ default
        );
        let config = AlertConfig {
            min_category: AqiCategory::Hazardous, // mute AQI-level alerts
            ..AlertConfig::default()
        };
        let alerts = evaluate(&slice, &config).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, AqiCategory::Unhealthy); // from AQI 180
        assert_eq!(alerts[1].severity, AqiCategory::Moderate); // no AQI at row
        assert!(alerts[0].message.contains("PM2.5"));
    }

    #[test]
    fn alerts_ordered_by_timestamp() {
        let slice = slice_with_aqi(
            vec![Some(160.0), Some(155.0)],
            vec![Some(60.0), Some(10.0)],
        );
        let alerts = evaluate(&slice, &AlertConfig::default()).unwrap();
        assert!(alerts.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn value_at_limit_does_not_alert() {
        let slice = slice_with_aqi(vec![None], vec![Some(WHO_PM25_LIMIT)]);
        let alerts = evaluate(&slice, &AlertConfig::default()).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn no_aqi_column_is_not_an_error() {
        let timestamps = vec![ts(0)];
        let mut columns = BTreeMap::new();
        columns.insert(Pollutant::Pm25, vec![Some(10.0)]);
        let slice = DatasetSlice::from_columns(None, timestamps, columns, None);
        let alerts = evaluate(&slice, &AlertConfig::default()).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn invalid_aqi_observation_is_signaled() {
        let slice = slice_with_aqi(vec![Some(-5.0)], vec![None]);
        assert!(matches!(
            evaluate(&slice, &AlertConfig::default()),
            Err(CoreError::InvalidValue(_))
        ));
    }

    #[test]
    fn empty_slice_is_signaled() {
        let slice = slice_with_aqi(vec![], vec![]);
        assert_eq!(
            evaluate(&slice, &AlertConfig::default()),
            Err(CoreError::EmptyInput)
        );
    }
}
