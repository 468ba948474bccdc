//! Core traits for intrinsic dimension estimation
//!
//! This module provides the foundational traits that dimension estimators
//! build upon. Algorithm-specific types (noise models, combination policies,
//! etc.) are defined in their respective crates.

use crate::{Neighbors, Result};

/// Estimator that derives a dimension from one sorted distance vector
///
/// The distances are the radii from a reference point to its nearest
/// neighbors (or a global distance sample), sorted ascending. Implementations
/// must be pure: the same input always produces the same estimate, and no
/// state is mutated, so rows can be dispatched to worker threads freely.
pub trait DistanceDimensionEstimator: Send + Sync {
    /// Estimate the dimension from sorted distances using noise scale `sigma`
    fn estimate_sorted(&self, sorted_distances: &[f64], sigma: f64) -> Result<f64>;

    /// Human-readable name of the estimator
    fn name(&self) -> &str;
}

/// Access to the global dimension held by a fit result
pub trait HasDimension {
    /// The global intrinsic dimension estimate
    fn dimension(&self) -> f64;
}

/// Estimator lifecycle over a data matrix
///
/// `data` is a row-major matrix: one `Vec<f64>` per sample. Each call to
/// [`fit`](DimensionEstimator::fit) produces a fresh result; the estimator
/// itself is never mutated.
pub trait DimensionEstimator {
    /// Per-call parameters
    type Params;

    /// Result of a fit
    type Output: HasDimension;

    /// Fit on `data`, optionally bypassing the neighbor search
    fn fit(
        &self,
        data: &[Vec<f64>],
        precomputed: Option<&Neighbors>,
        params: &Self::Params,
    ) -> Result<Self::Output>;

    /// Fit and return only the global dimension
    fn fit_predict(
        &self,
        data: &[Vec<f64>],
        precomputed: Option<&Neighbors>,
        params: &Self::Params,
    ) -> Result<f64> {
        self.fit(data, precomputed, params).map(|fitted| fitted.dimension())
    }
}
