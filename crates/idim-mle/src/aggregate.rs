//! Reduction of pointwise estimates to one global dimension
//!
//! All combinations are NaN-sensitive: a single NaN pointwise estimate makes
//! the global estimate NaN. Nothing is skipped silently. An empty input also
//! yields NaN.

use idim_core::utils::distinct_sorted;
use idim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};
use std::fmt;
use std::str::FromStr;

/// Combination policy for pointwise estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// `1 / mean(1 / m)`, the maximum-likelihood combination
    #[default]
    Mle,
    /// Arithmetic mean
    Mean,
    /// Median
    Median,
}

impl Combination {
    pub const NAMES: &'static [&'static str] = &["mle", "mean", "median"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mle => "mle",
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }

    /// Combine pointwise estimates into one value
    pub fn combine(&self, estimates: &[f64]) -> f64 {
        match self {
            Self::Mle => harmonic_mean(estimates),
            Self::Mean => mean(estimates),
            Self::Median => median(estimates),
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Combination {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mle" => Ok(Self::Mle),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            other => Err(Error::unknown_option("comb", other, Self::NAMES)),
        }
    }
}

/// Arithmetic mean, NaN for empty input
///
/// Summed in one pass, so infinite values give the same result wherever they
/// sit in the input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, NaN if the input is empty or contains NaN
///
/// Even-length input averages the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    Data::new(values.to_vec()).median()
}

/// Reciprocal of the mean reciprocal
///
/// A zero estimate contributes an infinite reciprocal and drives the result
/// to zero; an infinite estimate contributes zero.
pub fn harmonic_mean(values: &[f64]) -> f64 {
    let reciprocals: Vec<f64> = values.iter().map(|v| 1.0 / v).collect();
    1.0 / mean(&reciprocals)
}

/// Global distance sample for the non-neighborhood mode
///
/// All observed neighbor radii, deduplicated, sorted ascending and truncated
/// to the `n` smallest.
pub fn global_distance_sample(distances: &[Vec<f64>], n: usize) -> Vec<f64> {
    let mut sample = distinct_sorted(distances.iter().flatten().copied());
    sample.truncate(n);
    sample
}
