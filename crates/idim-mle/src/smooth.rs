//! Neighborhood smoothing of pointwise estimates

use idim_core::{Error, Result};

/// Average every estimate with the estimates of its neighbors
///
/// Output `i` is the mean of `estimates[i]` and `estimates[j]` for every `j`
/// in `neighbor_indices[i]`, each counted once as listed. The input estimates
/// are left untouched. NaN and infinite estimates propagate to every point
/// whose neighborhood contains them.
pub fn smooth_pointwise(estimates: &[f64], neighbor_indices: &[Vec<usize>]) -> Result<Vec<f64>> {
    if neighbor_indices.len() != estimates.len() {
        return Err(Error::size_mismatch(
            estimates.len(),
            neighbor_indices.len(),
            "neighbor index rows for smoothing",
        ));
    }

    neighbor_indices
        .iter()
        .enumerate()
        .map(|(i, neighbors)| {
            let mut sum = estimates[i];
            for &j in neighbors {
                let value = estimates.get(j).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "neighbor index {j} of row {i} is out of range for {} points",
                        estimates.len()
                    ))
                })?;
                sum += value;
            }
            Ok(sum / (neighbors.len() + 1) as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_point_graph() {
        let estimates = [1.0, 2.0, 6.0];
        let indices = vec![vec![1], vec![0, 2], vec![1]];

        let smoothed = smooth_pointwise(&estimates, &indices).unwrap();
        assert_relative_eq!(smoothed[0], (1.0 + 2.0) / 2.0);
        assert_relative_eq!(smoothed[1], (2.0 + 1.0 + 6.0) / 3.0);
        assert_relative_eq!(smoothed[2], (6.0 + 2.0) / 2.0);
        assert_eq!(estimates, [1.0, 2.0, 6.0]);
    }

    #[test]
    fn test_no_neighbors_keeps_value() {
        let smoothed = smooth_pointwise(&[3.5], &[vec![]]).unwrap();
        assert_eq!(smoothed, vec![3.5]);
    }

    #[test]
    fn test_nan_propagates_to_neighbors_only() {
        let estimates = [1.0, f64::NAN, 3.0];
        let indices = vec![vec![1], vec![0], vec![0]];
        let smoothed = smooth_pointwise(&estimates, &indices).unwrap();
        assert!(smoothed[0].is_nan());
        assert!(smoothed[1].is_nan());
        assert_relative_eq!(smoothed[2], 2.0);
    }

    #[test]
    fn test_out_of_range_index() {
        let err = smooth_pointwise(&[1.0, 2.0], &[vec![1], vec![5]]).unwrap_err();
        assert!(err.to_string().contains("neighbor index 5 of row 1"));
    }

    #[test]
    fn test_row_count_mismatch() {
        assert!(smooth_pointwise(&[1.0, 2.0], &[vec![1]]).is_err());
    }
}
