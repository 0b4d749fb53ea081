//! AQI severity categorization.
//!
//! A fixed, contiguous partition of [0, ∞) into severity bands with
//! inclusive upper bounds. The band table is built once as a const and the
//! first band whose upper bound is not exceeded wins, so a value sitting
//! exactly on a boundary (50, 100, 150, 200) belongs to the lower band.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity of an Air Quality Index value. Ordered from least to most
/// severe so threshold comparisons (`severity >= Unhealthy`) work.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    Hazardous,
}

/// One severity band: every AQI value up to and including `upper` that no
/// earlier band claimed.
#[derive(Debug, Clone, Copy)]
pub struct AqiBand {
    pub upper: f64,
    pub category: AqiCategory,
}

/// The band table, lowest to highest. Contiguous and exhaustive over
/// [0, ∞); the last band is unbounded.
pub const BANDS: [AqiBand; 5] = [
    AqiBand {
        upper: 50.0,
        category: AqiCategory::Good,
    },
    AqiBand {
        upper: 100.0,
        category: AqiCategory::Moderate,
    },
    AqiBand {
        upper: 150.0,
        category: AqiCategory::UnhealthySensitive,
    },
    AqiBand {
        upper: 200.0,
        category: AqiCategory::Unhealthy,
    },
    AqiBand {
        upper: f64::INFINITY,
        category: AqiCategory::Hazardous,
    },
];

/// Map an AQI value to its severity band.
///
/// Pure and deterministic. Non-finite or negative input is a caller error,
/// signaled as [`CoreError::InvalidValue`].
pub fn categorize(aqi: f64) -> Result<AqiCategory, CoreError> {
    if !aqi.is_finite() || aqi < 0.0 {
        return Err(CoreError::InvalidValue(aqi));
    }
    for band in &BANDS {
        if aqi <= band.upper {
            return Ok(band.category);
        }
    }
    // The last band is unbounded, so every finite value matched above.
    Ok(AqiCategory::Hazardous)
}

impl AqiCategory {
    /// Human-readable severity label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Display color name.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "yellow",
            Self::UnhealthySensitive => "orange",
            Self::Unhealthy => "red",
            Self::Hazardous => "purple",
        }
    }

    /// Display hex value for the color.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Good => "#2ecc71",
            Self::Moderate => "#f1c40f",
            Self::UnhealthySensitive => "#e67e22",
            Self::Unhealthy => "#e74c3c",
            Self::Hazardous => "#8e44ad",
        }
    }

    /// Parse a CLI-style name: `"good"`, `"moderate"`, `"sensitive"`,
    /// `"unhealthy"`, `"hazardous"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "moderate" => Some(Self::Moderate),
            "sensitive" | "unhealthy-sensitive" | "unhealthy_sensitive" => {
                Some(Self::UnhealthySensitive)
            }
            "unhealthy" => Some(Self::Unhealthy),
            "hazardous" => Some(Self::Hazardous),
            _ => None,
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_belong_to_lower_band() {
        assert_eq!(categorize(50.0), Ok(AqiCategory::Good));
        assert_eq!(categorize(100.0), Ok(AqiCategory::Moderate));
        assert_eq!(categorize(150.0), Ok(AqiCategory::UnhealthySensitive));
        assert_eq!(categorize(200.0), Ok(AqiCategory::Unhealthy));
        assert_eq!(categorize(100.0001), Ok(AqiCategory::UnhealthySensitive));
    }

    #[test]
    fn representative_values() {
        assert_eq!(categorize(0.0), Ok(AqiCategory::Good));
        assert_eq!(categorize(78.0), Ok(AqiCategory::Moderate));
        assert_eq!(categorize(201.0), Ok(AqiCategory::Hazardous));
        assert_eq!(categorize(480.0), Ok(AqiCategory::Hazardous));
    }

    #[test]
    fn whole_good_band() {
        for v in 0..=50 {
            assert_eq!(categorize(f64::from(v)), Ok(AqiCategory::Good));
        }
    }

    #[test]
    fn invalid_input_is_signaled() {
        assert!(matches!(
            categorize(-1.0),
            Err(CoreError::InvalidValue(_))
        ));
        assert!(matches!(
            categorize(f64::NAN),
            Err(CoreError::InvalidValue(_))
        ));
        assert!(matches!(
            categorize(f64::INFINITY),
            Err(CoreError::InvalidValue(_))
        ));
    }

    #[test]
    fn deterministic() {
        assert_eq!(categorize(123.4), categorize(123.4));
    }

    #[test]
    fn severity_ordering() {
        assert!(AqiCategory::Good < AqiCategory::Moderate);
        assert!(AqiCategory::Unhealthy < AqiCategory::Hazardous);
    }

    #[test]
    fn bands_are_contiguous_and_ascending() {
        for pair in BANDS.windows(2) {
            assert!(pair[0].upper < pair[1].upper);
            assert!(pair[0].category < pair[1].category);
        }
        assert_eq!(BANDS[4].upper, f64::INFINITY);
    }
}
