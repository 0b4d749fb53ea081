//! Declarative dataset schema: which CSV column plays which role.
//!
//! The schema is supplied once by configuration (a JSON file or the built-in
//! default) instead of being re-derived per call from column-name substrings.
//! Loading validates it up front; after that every lookup is a plain match.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A measured substance with a concentration in µg/m³.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
}

/// All pollutants, in display order.
pub const ALL_POLLUTANTS: [Pollutant; 6] = [
    Pollutant::Pm25,
    Pollutant::Pm10,
    Pollutant::No2,
    Pollutant::O3,
    Pollutant::So2,
    Pollutant::Co,
];

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pm25 => write!(f, "PM2.5"),
            Self::Pm10 => write!(f, "PM10"),
            Self::No2 => write!(f, "NO2"),
            Self::O3 => write!(f, "O3"),
            Self::So2 => write!(f, "SO2"),
            Self::Co => write!(f, "CO"),
        }
    }
}

impl Pollutant {
    /// Parse a pollutant from common spellings: `"PM2.5"`, `"pm25"`,
    /// `"pm2_5"`, `"NO2"`, ... Case and punctuation insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "pm25" => Some(Self::Pm25),
            "pm10" => Some(Self::Pm10),
            "no2" => Some(Self::No2),
            "o3" => Some(Self::O3),
            "so2" => Some(Self::So2),
            "co" => Some(Self::Co),
            _ => None,
        }
    }
}

/// Role a CSV column plays in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Sample time. Exactly one column must carry this role.
    Timestamp,
    /// Monitoring station / city label. At most one column.
    Location,
    /// A pollutant concentration column.
    Pollutant(Pollutant),
    /// A precomputed Air Quality Index column.
    Aqi,
    /// Present in the file, not loaded.
    Ignore,
}

/// One column binding: CSV header name → role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub name: String,
    pub role: ColumnRole,
}

/// The full column binding for a dataset, plus the timestamp format.
///
/// Serializable so it can live in a JSON file next to the data:
///
/// ```json
/// {
///   "columns": [
///     { "name": "timestamp", "role": "timestamp" },
///     { "name": "location", "role": "location" },
///     { "name": "pm25", "role": { "pollutant": "PM2.5" } },
///     { "name": "aqi", "role": "aqi" }
///   ],
///   "timestamp_format": "%Y-%m-%d %H:%M:%S"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub columns: Vec<ColumnBinding>,
    /// chrono `strftime` format for the timestamp column.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for DatasetSchema {
    /// Built-in binding matching the sample dataset layout: `timestamp`,
    /// `location`, one lowercase column per pollutant, `aqi`.
    fn default() -> Self {
        let mut columns = vec![
            ColumnBinding {
                name: "timestamp".to_string(),
                role: ColumnRole::Timestamp,
            },
            ColumnBinding {
                name: "location".to_string(),
                role: ColumnRole::Location,
            },
        ];
        for p in ALL_POLLUTANTS {
            columns.push(ColumnBinding {
                name: p.to_string().replace('.', "").to_ascii_lowercase(),
                role: ColumnRole::Pollutant(p),
            });
        }
        columns.push(ColumnBinding {
            name: "aqi".to_string(),
            role: ColumnRole::Aqi,
        });
        Self {
            columns,
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl DatasetSchema {
    /// Load a schema from a JSON file and validate it.
    pub fn from_path(path: &std::path::Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        let schema: Self = serde_json::from_str(&text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Write the schema as pretty JSON.
    pub fn to_path(&self, path: &std::path::Path) -> Result<(), LoadError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Check structural invariants: exactly one timestamp binding, at most
    /// one location binding, no pollutant bound twice, no column name bound
    /// twice.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut timestamps = 0usize;
        let mut locations = 0usize;
        let mut aqis = 0usize;
        let mut seen_pollutants: Vec<Pollutant> = Vec::new();
        let mut seen_names: Vec<&str> = Vec::new();

        for binding in &self.columns {
            if seen_names.contains(&binding.name.as_str()) {
                return Err(LoadError::Schema(format!(
                    "column '{}' bound more than once",
                    binding.name
                )));
            }
            seen_names.push(&binding.name);

            match &binding.role {
                ColumnRole::Timestamp => timestamps += 1,
                ColumnRole::Location => locations += 1,
                ColumnRole::Aqi => aqis += 1,
                ColumnRole::Pollutant(p) => {
                    if seen_pollutants.contains(p) {
                        return Err(LoadError::Schema(format!(
                            "pollutant {p} bound more than once"
                        )));
                    }
                    seen_pollutants.push(*p);
                }
                ColumnRole::Ignore => {}
            }
        }

        if timestamps != 1 {
            return Err(LoadError::Schema(format!(
                "expected exactly one timestamp column, got {timestamps}"
            )));
        }
        if locations > 1 {
            return Err(LoadError::Schema(format!(
                "expected at most one location column, got {locations}"
            )));
        }
        if aqis > 1 {
            return Err(LoadError::Schema(format!(
                "expected at most one AQI column, got {aqis}"
            )));
        }
        Ok(())
    }

    /// Role bound to a column name, if any.
    pub fn role_of(&self, name: &str) -> Option<&ColumnRole> {
        self.columns
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.role)
    }

    /// Name of the timestamp column.
    pub fn timestamp_column(&self) -> Option<&str> {
        self.column_with(|r| matches!(r, ColumnRole::Timestamp))
    }

    /// Name of the location column, if bound.
    pub fn location_column(&self) -> Option<&str> {
        self.column_with(|r| matches!(r, ColumnRole::Location))
    }

    /// Name of the AQI column, if bound.
    pub fn aqi_column(&self) -> Option<&str> {
        self.column_with(|r| matches!(r, ColumnRole::Aqi))
    }

    /// Pollutants bound by this schema, in binding order.
    pub fn pollutants(&self) -> Vec<Pollutant> {
        self.columns
            .iter()
            .filter_map(|b| match b.role {
                ColumnRole::Pollutant(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn column_with(&self, pred: impl Fn(&ColumnRole) -> bool) -> Option<&str> {
        self.columns
            .iter()
            .find(|b| pred(&b.role))
            .map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        let schema = DatasetSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.timestamp_column(), Some("timestamp"));
        assert_eq!(schema.location_column(), Some("location"));
        assert_eq!(schema.aqi_column(), Some("aqi"));
        assert_eq!(schema.pollutants().len(), 6);
    }

    #[test]
    fn pollutant_from_name_spellings() {
        assert_eq!(Pollutant::from_name("PM2.5"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_name("pm25"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_name("pm2_5"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_name("NO2"), Some(Pollutant::No2));
        assert_eq!(Pollutant::from_name("ozone"), None);
    }

    #[test]
    fn duplicate_pollutant_rejected() {
        let schema = DatasetSchema {
            columns: vec![
                ColumnBinding {
                    name: "time".into(),
                    role: ColumnRole::Timestamp,
                },
                ColumnBinding {
                    name: "a".into(),
                    role: ColumnRole::Pollutant(Pollutant::O3),
                },
                ColumnBinding {
                    name: "b".into(),
                    role: ColumnRole::Pollutant(Pollutant::O3),
                },
            ],
            timestamp_format: "%Y-%m-%d %H:%M:%S".into(),
        };
        assert!(matches!(schema.validate(), Err(LoadError::Schema(_))));
    }

    #[test]
    fn missing_timestamp_rejected() {
        let schema = DatasetSchema {
            columns: vec![ColumnBinding {
                name: "pm25".into(),
                role: ColumnRole::Pollutant(Pollutant::Pm25),
            }],
            timestamp_format: "%Y-%m-%d %H:%M:%S".into(),
        };
        assert!(matches!(schema.validate(), Err(LoadError::Schema(_))));
    }

    #[test]
    fn schema_json_round_trip() {
        let schema = DatasetSchema::default();
        let json = serde_json::to_string(&schema).unwrap();
        let back: DatasetSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
