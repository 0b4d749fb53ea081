//! In-memory dataset model: the full loaded table and filtered slices of it.
//!
//! Storage is column-major: one `Vec<Option<f64>>` per pollutant, parallel to
//! the timestamp vector, with `None` marking a missing reading. Rows are kept
//! sorted by timestamp. Filtering never mutates — it produces a new slice.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::schema::Pollutant;

/// One non-missing sample: a pollutant value at a (timestamp, location)
/// coordinate. The coordinate is owned by the slice, not the reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub pollutant: Pollutant,
    pub value: f64,
}

/// Trailing time window anchored at the newest timestamp of the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Full,
    Last24h,
    Last7d,
    Last30d,
}

impl TimeRange {
    /// Window length; `None` means the full dataset.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Full => None,
            Self::Last24h => Some(Duration::hours(24)),
            Self::Last7d => Some(Duration::days(7)),
            Self::Last30d => Some(Duration::days(30)),
        }
    }

    /// Parse a CLI-style flag: `"full"`, `"24h"`, `"7d"`, `"30d"`.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.to_ascii_lowercase().as_str() {
            "full" | "all" => Some(Self::Full),
            "24h" => Some(Self::Last24h),
            "7d" => Some(Self::Last7d),
            "30d" => Some(Self::Last30d),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Last24h => write!(f, "24h"),
            Self::Last7d => write!(f, "7d"),
            Self::Last30d => write!(f, "30d"),
        }
    }
}

/// A filtered, time-bounded, location-bounded view of the dataset.
///
/// Immutable once built; all statistics functions only read it.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSlice {
    location: Option<String>,
    timestamps: Vec<NaiveDateTime>,
    columns: BTreeMap<Pollutant, Vec<Option<f64>>>,
    aqi: Option<Vec<Option<f64>>>,
}

impl DatasetSlice {
    /// Build a slice from column vectors. Every column (and the AQI column,
    /// when present) must be as long as the timestamp vector.
    pub fn from_columns(
        location: Option<String>,
        timestamps: Vec<NaiveDateTime>,
        columns: BTreeMap<Pollutant, Vec<Option<f64>>>,
        aqi: Option<Vec<Option<f64>>>,
    ) -> Self {
        for (p, col) in &columns {
            assert_eq!(
                col.len(),
                timestamps.len(),
                "column {p} length does not match timestamps"
            );
        }
        if let Some(col) = &aqi {
            assert_eq!(
                col.len(),
                timestamps.len(),
                "AQI column length does not match timestamps"
            );
        }
        Self {
            location,
            timestamps,
            columns,
            aqi,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the slice has no rows.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Location label this slice was filtered to, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Row timestamps, ascending.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Pollutant columns present in this slice, in display order.
    pub fn pollutants(&self) -> Vec<Pollutant> {
        self.columns.keys().copied().collect()
    }

    /// Whether the slice carries a column for `pollutant`.
    pub fn has_column(&self, pollutant: Pollutant) -> bool {
        self.columns.contains_key(&pollutant)
    }

    /// The raw column for `pollutant`, `None` if not present.
    pub fn column(&self, pollutant: Pollutant) -> Option<&[Option<f64>]> {
        self.columns.get(&pollutant).map(Vec::as_slice)
    }

    /// The AQI column, if the schema bound one.
    pub fn aqi(&self) -> Option<&[Option<f64>]> {
        self.aqi.as_deref()
    }

    /// Non-missing readings of one pollutant, in timestamp order.
    pub fn readings(&self, pollutant: Pollutant) -> Vec<Reading> {
        match self.columns.get(&pollutant) {
            None => Vec::new(),
            Some(col) => self
                .timestamps
                .iter()
                .zip(col.iter())
                .filter_map(|(&timestamp, v)| {
                    v.map(|value| Reading {
                        timestamp,
                        pollutant,
                        value,
                    })
                })
                .collect(),
        }
    }
}

/// The full loaded dataset: every row of the source file that survived
/// ingestion, sorted by timestamp, with an optional per-row location label.
#[derive(Debug, Clone)]
pub struct Dataset {
    timestamps: Vec<NaiveDateTime>,
    locations: Option<Vec<String>>,
    columns: BTreeMap<Pollutant, Vec<Option<f64>>>,
    aqi: Option<Vec<Option<f64>>>,
}

impl Dataset {
    /// Build a dataset from parallel column vectors (loader entry point).
    /// Same length requirements as [`DatasetSlice::from_columns`].
    pub fn from_columns(
        timestamps: Vec<NaiveDateTime>,
        locations: Option<Vec<String>>,
        columns: BTreeMap<Pollutant, Vec<Option<f64>>>,
        aqi: Option<Vec<Option<f64>>>,
    ) -> Self {
        if let Some(locs) = &locations {
            assert_eq!(
                locs.len(),
                timestamps.len(),
                "location column length does not match timestamps"
            );
        }
        for (p, col) in &columns {
            assert_eq!(
                col.len(),
                timestamps.len(),
                "column {p} length does not match timestamps"
            );
        }
        if let Some(col) = &aqi {
            assert_eq!(
                col.len(),
                timestamps.len(),
                "AQI column length does not match timestamps"
            );
        }
        Self {
            timestamps,
            locations,
            columns,
            aqi,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Pollutant columns carried by the dataset.
    pub fn pollutants(&self) -> Vec<Pollutant> {
        self.columns.keys().copied().collect()
    }

    /// Whether the dataset carries an AQI column.
    pub fn has_aqi(&self) -> bool {
        self.aqi.is_some()
    }

    /// Oldest and newest timestamp, `None` for an empty dataset.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Distinct location labels, in first-seen order. Empty when the schema
    /// bound no location column.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = Vec::new();
        if let Some(locs) = &self.locations {
            for loc in locs {
                if !seen.contains(loc) {
                    seen.push(loc.clone());
                }
            }
        }
        seen
    }

    /// Build a slice: optional location equality filter, then a trailing
    /// time window anchored at the newest remaining timestamp.
    pub fn slice(&self, location: Option<&str>, window: TimeRange) -> DatasetSlice {
        let by_location: Vec<usize> = (0..self.timestamps.len())
            .filter(|&i| match (location, &self.locations) {
                (Some(wanted), Some(locs)) => locs[i] == wanted,
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect();

        let newest = by_location.last().copied();
        let indices: Vec<usize> = match (window.duration(), newest) {
            (Some(span), Some(newest)) => {
                let start = self.timestamps[newest] - span;
                by_location
                    .into_iter()
                    .filter(|&i| self.timestamps[i] >= start)
                    .collect()
            }
            _ => by_location,
        };

        let timestamps: Vec<NaiveDateTime> =
            indices.iter().map(|&i| self.timestamps[i]).collect();
        let columns: BTreeMap<Pollutant, Vec<Option<f64>>> = self
            .columns
            .iter()
            .map(|(&p, col)| (p, indices.iter().map(|&i| col[i]).collect()))
            .collect();
        let aqi = self
            .aqi
            .as_ref()
            .map(|col| indices.iter().map(|&i| col[i]).collect());

        DatasetSlice::from_columns(location.map(str::to_string), timestamps, columns, aqi)
    }
}
