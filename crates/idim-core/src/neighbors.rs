//! Exact k-nearest-neighbor structures.
//!
//! ## Purpose
//!
//! Dimension estimators consume, for every sample, the sorted distances to
//! its `k` nearest neighbors together with the neighbors' row indices. This
//! module provides that pair of aligned arrays, either computed here by an
//! exhaustive search or supplied by the caller.
//!
//! ## Invariants
//!
//! * `distances[i]` and `indices[i]` have the same length for every row.
//! * Rows produced by [`knn`] are sorted ascending by distance, ties broken
//!   by neighbor index, and never contain the query point itself.
//!
//! ## Non-goals
//!
//! * Approximate search and spatial index structures.

use crate::execution::ExecutionEngine;
use crate::utils::euclidean;
use crate::{Error, Result};
use ordered_float::OrderedFloat;

/// Aligned neighbor distances and indices, one row per sample
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbors {
    distances: Vec<Vec<f64>>,
    indices: Vec<Vec<usize>>,
}

impl Neighbors {
    /// Wrap precomputed arrays
    ///
    /// Only alignment is checked: both arrays need the same number of rows and
    /// matching row lengths. Distances are used as given.
    pub fn from_arrays(distances: Vec<Vec<f64>>, indices: Vec<Vec<usize>>) -> Result<Self> {
        if distances.len() != indices.len() {
            return Err(Error::size_mismatch(
                distances.len(),
                indices.len(),
                "neighbor index rows",
            ));
        }
        for (i, (d, idx)) in distances.iter().zip(&indices).enumerate() {
            if d.len() != idx.len() {
                return Err(Error::size_mismatch(
                    d.len(),
                    idx.len(),
                    &format!("neighbor indices of row {i}"),
                ));
            }
        }
        Ok(Self { distances, indices })
    }

    /// Sorted neighbor distances per sample
    pub fn distances(&self) -> &[Vec<f64>] {
        &self.distances
    }

    /// Neighbor row indices per sample
    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Exhaustive Euclidean k-nearest-neighbor search
///
/// Every row of `data` is a query against all other rows. Requires
/// `1 <= k < data.len()`.
pub fn knn<E: ExecutionEngine>(data: &[Vec<f64>], k: usize, engine: &E) -> Result<Neighbors> {
    let n = data.len();
    if k == 0 {
        return Err(Error::InvalidParameter(
            "number of neighbors must be at least 1".to_string(),
        ));
    }
    if k >= n {
        return Err(Error::too_few_samples(k + 1, n));
    }

    let rows = engine.execute_batch(n, |i| nearest_to(data, i, k));
    let (distances, indices) = rows.into_iter().unzip();
    Ok(Neighbors { distances, indices })
}

fn nearest_to(data: &[Vec<f64>], query: usize, k: usize) -> (Vec<f64>, Vec<usize>) {
    let point = &data[query];
    let mut candidates: Vec<(OrderedFloat<f64>, usize)> = data
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != query)
        .map(|(j, other)| (OrderedFloat(euclidean(point, other)), j))
        .collect();

    if candidates.len() > k {
        candidates.select_nth_unstable(k - 1);
        candidates.truncate(k);
    }
    candidates.sort_unstable();

    candidates
        .into_iter()
        .map(|(d, j)| (d.into_inner(), j))
        .unzip()
}
