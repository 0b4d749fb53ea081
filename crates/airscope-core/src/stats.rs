//! Descriptive statistics, data-quality ratios, and pairwise Pearson
//! correlation over dataset slices.
//!
//! Everything here is a pure, synchronous, single-pass computation over the
//! slice it is given: no caching, no retries, no hidden state. Values are
//! kept at full `f64` precision — display rounding belongs to the caller.

use serde::Serialize;

use crate::error::CoreError;
use crate::schema::Pollutant;
use crate::slice::DatasetSlice;

/// Variance below this is treated as zero for correlation purposes.
const VARIANCE_EPS: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Descriptive statistics for one pollutant column of one slice.
///
/// `std_dev` is the sample standard deviation (n−1 divisor); a single
/// observation yields 0.0. `completeness` is the share of slice rows with a
/// non-missing value for this column, in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub pollutant: Pollutant,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub count: usize,
    pub completeness: f64,
}

/// Slice-wide quality panel.
///
/// `completeness` counts non-missing cells across all pollutant columns.
/// `validity` is the share of present values that are physically plausible
/// (finite and non-negative); a slice with no present values is vacuously
/// valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    pub completeness: f64,
    pub validity: f64,
}

/// Symmetric Pearson correlation matrix with a unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pollutants: Vec<Pollutant>,
    /// Row-major `n × n` coefficients.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Columns of the matrix, in the order rows/columns are laid out.
    pub fn pollutants(&self) -> &[Pollutant] {
        &self.pollutants
    }

    /// Coefficient for a pair, `None` if either pollutant is not in the
    /// matrix. `get(a, a)` is exactly 1.0.
    pub fn get(&self, a: Pollutant, b: Pollutant) -> Option<f64> {
        let i = self.pollutants.iter().position(|&p| p == a)?;
        let j = self.pollutants.iter().position(|&p| p == b)?;
        Some(self.values[i * self.pollutants.len() + j])
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Summarize one pollutant column of a slice.
///
/// Errors: [`CoreError::EmptyInput`] for a slice with no rows or a column
/// with no observations, [`CoreError::UnknownColumn`] when the slice does
/// not carry the column.
pub fn summarize(slice: &DatasetSlice, pollutant: Pollutant) -> Result<StatsSummary, CoreError> {
    if slice.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    let column = slice
        .column(pollutant)
        .ok_or(CoreError::UnknownColumn(pollutant))?;

    let values: Vec<f64> = column.iter().filter_map(|v| *v).collect();
    if values.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let std_dev = if values.len() < 2 {
        0.0
    } else {
        let ss: f64 = values.iter().map(|&x| (x - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    };

    Ok(StatsSummary {
        pollutant,
        mean,
        median,
        min,
        max,
        std_dev,
        count: values.len(),
        completeness: values.len() as f64 / slice.len() as f64,
    })
}

/// Quality panel across all pollutant columns of a slice.
pub fn slice_quality(slice: &DatasetSlice) -> Result<DataQuality, CoreError> {
    if slice.is_empty() || slice.pollutants().is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut cells = 0usize;
    let mut present = 0usize;
    let mut valid = 0usize;
    for pollutant in slice.pollutants() {
        // pollutants() only lists carried columns, so the lookup cannot miss
        let column = slice
            .column(pollutant)
            .ok_or(CoreError::UnknownColumn(pollutant))?;
        cells += column.len();
        for v in column.iter().filter_map(|v| *v) {
            present += 1;
            if v.is_finite() && v >= 0.0 {
                valid += 1;
            }
        }
    }

    Ok(DataQuality {
        completeness: present as f64 / cells as f64,
        validity: if present == 0 {
            1.0
        } else {
            valid as f64 / present as f64
        },
    })
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation across the selected columns.
///
/// Each pair is computed over the rows where both columns are non-missing
/// (pairwise-complete observations). Errors:
/// [`CoreError::InsufficientColumns`] for fewer than two distinct columns,
/// [`CoreError::UnknownColumn`] when a column is absent,
/// [`CoreError::EmptyInput`] for an empty slice, and
/// [`CoreError::DegenerateColumn`] when a column has no variance over the
/// co-present rows of some pair (including fewer than two such rows).
pub fn correlate(
    slice: &DatasetSlice,
    pollutants: &[Pollutant],
) -> Result<CorrelationMatrix, CoreError> {
    let mut selected: Vec<Pollutant> = Vec::new();
    for &p in pollutants {
        if !selected.contains(&p) {
            selected.push(p);
        }
    }
    if selected.len() < 2 {
        return Err(CoreError::InsufficientColumns(selected.len()));
    }
    if slice.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    for &p in &selected {
        if !slice.has_column(p) {
            return Err(CoreError::UnknownColumn(p));
        }
    }

    let n = selected.len();
    let mut values = vec![0.0f64; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let a = selected[i];
            let b = selected[j];
            let r = pair_correlation(slice, a, b)?;
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    Ok(CorrelationMatrix {
        pollutants: selected,
        values,
    })
}

/// Pearson coefficient for one pair over co-present rows.
fn pair_correlation(
    slice: &DatasetSlice,
    a: Pollutant,
    b: Pollutant,
) -> Result<f64, CoreError> {
    let col_a = slice.column(a).ok_or(CoreError::UnknownColumn(a))?;
    let col_b = slice.column(b).ok_or(CoreError::UnknownColumn(b))?;

    let pairs: Vec<(f64, f64)> = col_a
        .iter()
        .zip(col_b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return Err(CoreError::DegenerateColumn(a));
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &(x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a < VARIANCE_EPS {
        return Err(CoreError::DegenerateColumn(a));
    }
    if var_b < VARIANCE_EPS {
        return Err(CoreError::DegenerateColumn(b));
    }
    Ok(cov / (var_a * var_b).sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
