//! Utility functions for working with data slices and row-major matrices

use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use idim_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by_key(|&x| OrderedFloat(x));
    sorted
}

/// Distinct values of `data`, sorted ascending
///
/// Equality is exact floating-point equality; NaN values collapse into one
/// entry at the end.
///
/// ```rust
/// use idim_core::utils::distinct_sorted;
///
/// let flat = [0.5, 0.2, 0.5, 0.9, 0.2];
/// assert_eq!(distinct_sorted(flat.iter().copied()), vec![0.2, 0.5, 0.9]);
/// ```
pub fn distinct_sorted<I>(data: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    data.into_iter()
        .map(OrderedFloat)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|x| x.into_inner())
        .collect()
}

/// Euclidean length of every row
pub fn row_norms(data: &[Vec<f64>]) -> Vec<f64> {
    data.iter()
        .map(|row| row.iter().map(|x| x * x).sum::<f64>().sqrt())
        .collect()
}

/// Mean of every column of a rectangular matrix
///
/// Returns an empty vector for an empty matrix.
pub fn column_means(data: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = data.first() else {
        return Vec::new();
    };
    let mut means = vec![0.0; first.len()];
    for row in data {
        for (acc, &x) in means.iter_mut().zip(row) {
            *acc += x;
        }
    }
    let n = data.len() as f64;
    means.iter_mut().for_each(|m| *m /= n);
    means
}

/// Subtract the column means from every row
pub fn center_rows(data: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let center = column_means(data);
    data.iter()
        .map(|row| row.iter().zip(&center).map(|(x, c)| x - c).collect())
        .collect()
}

/// Euclidean distance between two points of equal dimension
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
