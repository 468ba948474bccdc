//! Output of one maximum-likelihood fit

use crate::aggregate::Combination;
use idim_core::HasDimension;
use serde::Serialize;
use std::fmt;

/// Result of [`MleEstimator::fit`](crate::MleEstimator::fit)
///
/// A fresh value is produced by every fit and never updated afterwards.
/// Pointwise arrays are present only in the neighborhood-based mode; the
/// smoothed array only when smoothing was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    dimension: f64,
    dimension_pw: Option<Vec<f64>>,
    dimension_pw_smooth: Option<Vec<f64>>,
    n_neighbors: usize,
    comb: Option<Combination>,
}

impl FitResult {
    pub(crate) fn pointwise(
        dimension: f64,
        dimension_pw: Vec<f64>,
        dimension_pw_smooth: Option<Vec<f64>>,
        n_neighbors: usize,
        comb: Combination,
    ) -> Self {
        Self {
            dimension,
            dimension_pw: Some(dimension_pw),
            dimension_pw_smooth,
            n_neighbors,
            comb: Some(comb),
        }
    }

    pub(crate) fn global(dimension: f64, n_neighbors: usize) -> Self {
        Self {
            dimension,
            dimension_pw: None,
            dimension_pw_smooth: None,
            n_neighbors,
            comb: None,
        }
    }

    /// Global intrinsic dimension
    pub fn dimension(&self) -> f64 {
        self.dimension
    }

    /// Per-point estimates, in data row order
    pub fn dimension_pw(&self) -> Option<&[f64]> {
        self.dimension_pw.as_deref()
    }

    /// Neighborhood-averaged per-point estimates
    pub fn dimension_pw_smooth(&self) -> Option<&[f64]> {
        self.dimension_pw_smooth.as_deref()
    }

    /// Number of neighbors actually used, after clamping
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Combination applied to the pointwise estimates
    pub fn comb(&self) -> Option<Combination> {
        self.comb
    }

    pub fn is_fitted_pointwise(&self) -> bool {
        self.dimension_pw.is_some()
    }

    pub fn is_fitted_smooth(&self) -> bool {
        self.dimension_pw_smooth.is_some()
    }

    /// Number of NaN or infinite pointwise estimates
    pub fn non_finite_count(&self) -> usize {
        self.dimension_pw
            .as_ref()
            .map_or(0, |pw| pw.iter().filter(|d| !d.is_finite()).count())
    }
}

impl HasDimension for FitResult {
    fn dimension(&self) -> f64 {
        self.dimension
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dimension {:.4} ({} neighbors", self.dimension, self.n_neighbors)?;
        match self.comb {
            Some(comb) => write!(f, ", {comb} of {} points)", self.dimension_pw.as_ref().map_or(0, Vec::len)),
            None => write!(f, ", global sample)"),
        }
    }
}
