//! # airscope-core
//!
//! Air-quality analysis as a library: schema-driven dataset slices,
//! pollutant statistics, Pearson correlation, AQI severity bands, and
//! threshold alert rules.
//!
//! ## Quick Start
//!
//! ```no_run
//! use airscope_core::{DatasetSchema, Pollutant, TimeRange, load_csv, summarize};
//!
//! let schema = DatasetSchema::default();
//! let dataset = load_csv("air_quality.csv".as_ref(), &schema)?;
//!
//! let slice = dataset.slice(Some("Downtown"), TimeRange::Last24h);
//! let stats = summarize(&slice, Pollutant::Pm25)?;
//! println!("mean {:.2} µg/m³ over {} readings", stats.mean, stats.count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! CSV + schema → [`Dataset`] → filtered [`DatasetSlice`] → statistics /
//! correlation / categorization / alerts.
//!
//! Every computation past the loader is pure and synchronous: it reads an
//! immutable slice and returns plain data or a typed [`CoreError`]. There is
//! no shared mutable state, so independent slices can be processed from any
//! number of threads without coordination. Presentation — rounding, colors
//! beyond the categorizer's, layout — belongs entirely to the caller.

pub mod alert;
pub mod aqi;
pub mod error;
pub mod loader;
pub mod schema;
pub mod slice;
pub mod stats;

pub use alert::{Alert, AlertConfig, AlertKind, WHO_PM25_LIMIT, evaluate};
pub use aqi::{AqiBand, AqiCategory, BANDS, categorize};
pub use error::{CoreError, LoadError};
pub use loader::load_csv;
pub use schema::{ALL_POLLUTANTS, ColumnBinding, ColumnRole, DatasetSchema, Pollutant};
pub use slice::{Dataset, DatasetSlice, Reading, TimeRange};
pub use stats::{CorrelationMatrix, DataQuality, StatsSummary, correlate, slice_quality, summarize};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
