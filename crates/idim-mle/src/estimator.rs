//! Fit orchestration for the maximum-likelihood estimator

use crate::aggregate::global_distance_sample;
use crate::options::{FitParams, MleOptions, DEFAULT_N_NEIGHBORS};
use crate::pointwise::PointwiseEstimator;
use crate::result::FitResult;
use crate::smooth::smooth_pointwise;
use idim_core::utils::{center_rows, row_norms, sorted};
use idim_core::{
    check_matrix, knn, DimensionEstimator, DistanceDimensionEstimator, Error, ExecutionEngine,
    JobsEngine, Neighbors, Result,
};
use std::f64::consts::SQRT_2;
use tracing::{debug, instrument, warn};

/// Smallest data set a fit accepts: one point and two neighbors
const MIN_SAMPLES: usize = 3;

/// Smallest number of features a fit accepts
const MIN_FEATURES: usize = 2;

/// Maximum-likelihood intrinsic dimension estimator
///
/// Holds only validated [`MleOptions`]. Every call to [`fit`](Self::fit)
/// resolves the noise density afresh and returns a new [`FitResult`], so one
/// estimator can be shared between threads and fitted repeatedly.
///
/// # Example
///
/// ```rust
/// use idim_mle::{FitParams, MleEstimator, MleOptions};
///
/// // Points on a line embedded in the plane
/// let data: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, 2.0 * i as f64]).collect();
///
/// let estimator = MleEstimator::new(MleOptions::default());
/// let params = FitParams::default().with_n_neighbors(5);
/// let result = estimator.fit(&data, None, &params).unwrap();
/// assert!((result.dimension() - 1.0).abs() < 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MleEstimator {
    options: MleOptions,
}

impl MleEstimator {
    pub fn new(options: MleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MleOptions {
        &self.options
    }

    /// Fit on the rows of `data`
    ///
    /// With `precomputed` neighbors the search is skipped and the arrays are
    /// used as given. `n_neighbors` and `K` larger than the sample count are
    /// clamped with a warning.
    #[instrument(
        skip(self, data, precomputed, params),
        fields(
            n_samples = data.len(),
            neighborhood_based = self.options.neighborhood_based(),
            precomputed = precomputed.is_some()
        )
    )]
    pub fn fit(
        &self,
        data: &[Vec<f64>],
        precomputed: Option<&Neighbors>,
        params: &FitParams,
    ) -> Result<FitResult> {
        let requested = params.n_neighbors.unwrap_or(DEFAULT_N_NEIGHBORS);
        if requested < 2 {
            return Err(Error::InvalidParameter(format!(
                "n_neighbors must be at least 2, got {requested}"
            )));
        }

        let n_features = check_matrix(data, MIN_SAMPLES, MIN_FEATURES)?;
        self.check_noise_dim(n_features)?;

        let max_neighbors = data.len() - 1;
        let n_neighbors = clamp_to_samples("n_neighbors", requested, max_neighbors);
        let k_global = clamp_to_samples("K", self.options.k_global(), max_neighbors);

        let estimator = PointwiseEstimator::from_options(&self.options)?;
        let engine = JobsEngine::from_n_jobs(params.n_jobs)?;
        debug!(
            estimator = estimator.name(),
            n_neighbors,
            k_global,
            sigma = self.options.sigma(),
            strategy = ?engine.strategy(),
            threads = engine.num_threads(),
            "Resolved fit configuration"
        );

        let searched;
        let neighbors = match precomputed {
            Some(neighbors) => neighbors,
            None => {
                let k = if self.options.neighborhood_based() {
                    n_neighbors
                } else {
                    k_global
                };
                searched = knn(data, k, &engine)?;
                &searched
            }
        };

        if !self.options.neighborhood_based() {
            if params.smooth {
                debug!("Smoothing has no pointwise estimates to average in global mode");
            }
            let sample = global_distance_sample(neighbors.distances(), n_neighbors);
            // A lattice can leave a single distinct radius, which has no log ratio
            let dimension = if sample.len() < 2 {
                f64::NAN
            } else {
                estimator.estimate_sorted(&sample, SQRT_2 * self.options.sigma())?
            };
            debug!(sample_len = sample.len(), dimension, "Global estimate complete");
            return Ok(FitResult::global(dimension, n_neighbors));
        }

        let dimension_pw = self.pointwise(&estimator, neighbors.distances(), &engine)?;
        let non_finite = dimension_pw.iter().filter(|d| !d.is_finite()).count();
        debug!(rows = dimension_pw.len(), non_finite, "Pointwise estimates complete");

        let dimension = params.comb.combine(&dimension_pw);
        let dimension_pw_smooth = if params.smooth {
            Some(smooth_pointwise(&dimension_pw, neighbors.indices())?)
        } else {
            None
        };

        Ok(FitResult::pointwise(
            dimension,
            dimension_pw,
            dimension_pw_smooth,
            n_neighbors,
            params.comb,
        ))
    }

    /// Fit and return only the global dimension
    pub fn fit_predict(
        &self,
        data: &[Vec<f64>],
        precomputed: Option<&Neighbors>,
        params: &FitParams,
    ) -> Result<f64> {
        self.fit(data, precomputed, params).map(|result| result.dimension())
    }

    /// Estimate the dimension treating all of `data` as one neighborhood
    ///
    /// Rows are centered at their mean; the sorted norms of the centered rows
    /// form the distance vector.
    pub fn fit_once(&self, data: &[Vec<f64>]) -> Result<f64> {
        let n_features = check_matrix(data, 2, 1)?;
        self.check_noise_dim(n_features)?;

        let estimator = PointwiseEstimator::from_options(&self.options)?;
        let radii = sorted(&row_norms(&center_rows(data)));
        estimator.estimate_sorted(&radii, self.options.sigma())
    }

    /// Estimate every row of `distances` independently, in row order
    ///
    /// Rows are dispatched through `engine`; the first failing row aborts the
    /// whole batch.
    pub fn pointwise<D, E>(&self, estimator: &D, distances: &[Vec<f64>], engine: &E) -> Result<Vec<f64>>
    where
        D: DistanceDimensionEstimator + ?Sized,
        E: ExecutionEngine,
    {
        let sigma = self.options.sigma();
        engine
            .execute_batch(distances.len(), |i| estimator.estimate_sorted(&distances[i], sigma))
            .into_iter()
            .collect()
    }

    fn check_noise_dim(&self, n_features: usize) -> Result<()> {
        match self.options.noise_dim() {
            Some(n) if n < n_features => Err(Error::InvalidParameter(format!(
                "noise dimension {n} is smaller than the number of features {n_features}"
            ))),
            _ => Ok(()),
        }
    }
}

fn clamp_to_samples(name: &str, requested: usize, max_neighbors: usize) -> usize {
    if requested > max_neighbors {
        warn!(
            requested,
            clamped = max_neighbors,
            "{name} exceeds the number of other samples, clamping"
        );
        max_neighbors
    } else {
        requested
    }
}

impl DimensionEstimator for MleEstimator {
    type Params = FitParams;
    type Output = FitResult;

    fn fit(
        &self,
        data: &[Vec<f64>],
        precomputed: Option<&Neighbors>,
        params: &FitParams,
    ) -> Result<FitResult> {
        MleEstimator::fit(self, data, precomputed, params)
    }
}
