//! Error types shared across the crate.
//!
//! Computation errors ([`CoreError`]) are always signaled to the caller —
//! nothing is defaulted or logged-and-ignored. Ingestion has its own error
//! type ([`LoadError`]) so callers can tell "the file is bad" apart from
//! "the slice cannot answer this question".

use thiserror::Error;

use crate::schema::Pollutant;

/// Errors from the pure computation layer (statistics, correlation,
/// categorization, alerts).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The slice has no rows, or the selected column has no observations.
    #[error("no rows to summarize")]
    EmptyInput,

    /// The requested pollutant is not a column of the slice.
    #[error("pollutant {0} is not present in the slice")]
    UnknownColumn(Pollutant),

    /// Correlation was requested over fewer than two columns.
    #[error("correlation needs at least two columns, got {0}")]
    InsufficientColumns(usize),

    /// A column has no variance over the co-present rows, so any Pearson
    /// coefficient involving it is undefined.
    #[error("column {0} has no variance over the co-present rows")]
    DegenerateColumn(Pollutant),

    /// A non-finite or negative value was passed where an AQI is expected.
    #[error("AQI value {0} is not a finite non-negative number")]
    InvalidValue(f64),
}

/// Errors from loading a dataset file against a schema.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading dataset file")]
    Io(#[from] std::io::Error),

    #[error("parsing CSV")]
    Csv(#[from] csv::Error),

    #[error("parsing schema JSON")]
    SchemaJson(#[from] serde_json::Error),

    /// The schema binds a timestamp column the CSV header does not have.
    #[error("schema column '{0}' not found in CSV header")]
    MissingColumn(String),

    /// The schema itself is inconsistent (duplicate roles, duplicate
    /// pollutants, no timestamp binding).
    #[error("invalid schema: {0}")]
    Schema(String),
}
