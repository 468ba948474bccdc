//! Shape and value checks for row-major data matrices

use crate::{Error, Result};

/// Validate a data matrix and return its number of features
///
/// The matrix must be rectangular, contain only finite values and have at
/// least `min_samples` rows and `min_features` columns.
pub fn check_matrix(data: &[Vec<f64>], min_samples: usize, min_features: usize) -> Result<usize> {
    if data.len() < min_samples {
        return Err(Error::too_few_samples(min_samples, data.len()));
    }
    let n_features = data.first().map_or(0, Vec::len);
    if n_features < min_features {
        return Err(Error::too_few_features(min_features, n_features));
    }
    for (i, row) in data.iter().enumerate() {
        if row.len() != n_features {
            return Err(Error::size_mismatch(
                n_features,
                row.len(),
                &format!("data row {i}"),
            ));
        }
        if row.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite(&format!("data row {i}")));
        }
    }
    Ok(n_features)
}
