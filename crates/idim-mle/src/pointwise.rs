//! Maximum-likelihood dimension estimate from one sorted distance vector
//!
//! With `kfac = k - 1` (or `k - 2` when unbiased) and `Rk` the largest radius:
//!
//! ```text
//! no noise:  m = kfac / Σᵢ ln(Rk / Rᵢ)                     (i over all k radii)
//! noise:     m = kfac / Σⱼ N(Rⱼ) / D(Rⱼ)                   (j over the first k - 1)
//! ```
//!
//! where `N` and `D` are the integrals computed by [`IntegralEvaluator`].
//!
//! The unbiased correction removes the bias of the closed form only for
//! noise-free data away from any boundary; with noise it is a heuristic.
//!
//! Degenerate vectors are not errors. All-equal radii give a zero log sum
//! and therefore `+inf` (or NaN when `kfac` is also zero); a zero radius gives
//! an infinite log sum and therefore `0`.

use crate::integral::IntegralEvaluator;
use crate::noise::{ResolvedDensity, TransitionDensity};
use crate::options::MleOptions;
use idim_core::{DistanceDimensionEstimator, Error, Result};

/// Degrees of freedom in the numerator of the estimator
#[inline]
pub fn kfac(k: usize, unbiased: bool) -> f64 {
    if unbiased {
        k as f64 - 2.0
    } else {
        k as f64 - 1.0
    }
}

/// Sum of `ln(Rk / Rᵢ)` over every radius
pub fn log_ratio_sum(sorted_distances: &[f64]) -> f64 {
    let rk = max_radius(sorted_distances);
    sorted_distances.iter().map(|&r| (rk / r).ln()).sum()
}

fn max_radius(distances: &[f64]) -> f64 {
    distances.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Closed-form Levina-Bickel estimate
pub fn closed_form_estimate(sorted_distances: &[f64], unbiased: bool) -> f64 {
    kfac(sorted_distances.len(), unbiased) / log_ratio_sum(sorted_distances)
}

/// Per-point estimator with the density resolved once per fit
#[derive(Debug, Clone, PartialEq)]
pub struct PointwiseEstimator {
    density: Option<ResolvedDensity>,
    noise_dim: Option<usize>,
    unbiased: bool,
    integrator: IntegralEvaluator,
}

impl PointwiseEstimator {
    /// Resolve `options` into an estimator
    ///
    /// Fails for `iteration` before any numerical work. The density is
    /// derived from the options here, so building twice from the same options
    /// yields identical estimators.
    pub fn from_options(options: &MleOptions) -> Result<Self> {
        let approximation = options.integral_approximation();
        approximation.ensure_supported()?;

        Ok(Self {
            density: options.noise().map(|model| model.resolve(approximation)),
            noise_dim: options.noise_dim(),
            unbiased: options.unbiased(),
            integrator: IntegralEvaluator::default(),
        })
    }

    /// Replace the integrator used in the noise-corrected case
    pub fn with_integrator(mut self, integrator: IntegralEvaluator) -> Self {
        self.integrator = integrator;
        self
    }

    fn noise_corrected<D: TransitionDensity>(
        &self,
        density: &D,
        sorted_distances: &[f64],
        sigma: f64,
    ) -> f64 {
        let k = sorted_distances.len();
        let rk = max_radius(sorted_distances);

        let sum: f64 = sorted_distances[..k - 1]
            .iter()
            .map(|&rj| {
                self.integrator
                    .neighbor_integrals(density, rj, rk, sigma, self.noise_dim)
                    .ratio()
            })
            .sum();

        kfac(k, self.unbiased) / sum
    }
}

impl DistanceDimensionEstimator for PointwiseEstimator {
    fn estimate_sorted(&self, sorted_distances: &[f64], sigma: f64) -> Result<f64> {
        if sorted_distances.len() < 2 {
            return Err(Error::InsufficientData {
                what: "neighbor distances",
                expected: 2,
                actual: sorted_distances.len(),
            });
        }

        Ok(match &self.density {
            None => closed_form_estimate(sorted_distances, self.unbiased),
            Some(density) => self.noise_corrected(density, sorted_distances, sigma),
        })
    }

    fn name(&self) -> &str {
        match self.density {
            None => "MLE (Levina-Bickel)",
            Some(_) => "MLE (noise-corrected)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseModel;
    use crate::options::IntegralApproximation;
    use approx::assert_relative_eq;

    const RS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    fn golden_denominator() -> f64 {
        (5.0f64).ln() + (2.5f64).ln() + (5.0f64 / 3.0).ln() + (1.25f64).ln() + 0.0
    }

    fn estimator(builder: crate::options::MleOptionsBuilder) -> PointwiseEstimator {
        PointwiseEstimator::from_options(&builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_golden_biased() {
        let est = estimator(MleOptions::builder());
        let d = est.estimate_sorted(&RS, 0.0).unwrap();
        assert_relative_eq!(d, 4.0 / golden_denominator(), max_relative = 1e-12);
        assert_relative_eq!(d, 1.22711, epsilon = 1e-4);
    }

    #[test]
    fn test_golden_unbiased() {
        let biased = estimator(MleOptions::builder()).estimate_sorted(&RS, 0.0).unwrap();
        let unbiased = estimator(MleOptions::builder().unbiased(true))
            .estimate_sorted(&RS, 0.0)
            .unwrap();
        assert_relative_eq!(unbiased, 3.0 / golden_denominator(), max_relative = 1e-12);
        assert_relative_eq!(unbiased / biased, 3.0 / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_kfac() {
        assert_eq!(kfac(5, false), 4.0);
        assert_eq!(kfac(5, true), 3.0);
        assert_eq!(kfac(5, false) - kfac(5, true), 1.0);
    }

    #[test]
    fn test_scale_invariance() {
        let est = estimator(MleOptions::builder());
        let base = est.estimate_sorted(&RS, 0.0).unwrap();
        for c in [1e-3, 0.5, 7.0, 1e4] {
            let scaled: Vec<f64> = RS.iter().map(|r| r * c).collect();
            assert_relative_eq!(est.estimate_sorted(&scaled, 0.0).unwrap(), base, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_all_equal_is_infinite() {
        let est = estimator(MleOptions::builder());
        let d = est.estimate_sorted(&[2.0, 2.0, 2.0], 0.0).unwrap();
        assert_eq!(d, f64::INFINITY);
    }

    #[test]
    fn test_zero_radius_gives_zero() {
        let est = estimator(MleOptions::builder());
        let d = est.estimate_sorted(&[0.0, 1.0, 2.0], 0.0).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_too_short_vector_is_rejected() {
        let est = estimator(MleOptions::builder());
        assert!(est.estimate_sorted(&[1.0], 0.0).is_err());
        assert!(est.estimate_sorted(&[], 0.0).is_err());
    }

    #[test]
    fn test_iteration_fails_fast() {
        let opts = MleOptions::builder()
            .noise(Some(NoiseModel::GaussianHaro))
            .sigma(0.1)
            .integral_approximation(IntegralApproximation::Iteration)
            .build()
            .unwrap();
        assert!(matches!(
            PointwiseEstimator::from_options(&opts),
            Err(Error::NotImplemented(_))
        ));
    }

    #[test]
    fn test_small_noise_approaches_closed_form() {
        let closed = closed_form_estimate(&RS, false);
        for approx in [IntegralApproximation::Haro, IntegralApproximation::GuaranteedConvergence] {
            let est = estimator(
                MleOptions::builder()
                    .noise(Some(NoiseModel::GaussianHaro))
                    .sigma(0.01)
                    .integral_approximation(approx),
            );
            let d = est.estimate_sorted(&RS, 0.01).unwrap();
            assert_relative_eq!(d, closed, max_relative = 2e-2);
        }
    }

    #[test]
    fn test_tighter_integrator_agrees() {
        let opts = MleOptions::builder()
            .noise(Some(NoiseModel::GaussianHaro))
            .sigma(0.3)
            .build()
            .unwrap();
        let coarse = PointwiseEstimator::from_options(&opts).unwrap();
        let fine = coarse.clone().with_integrator(IntegralEvaluator::new(1e-9, 1e-9, 500));

        let a = coarse.estimate_sorted(&RS, 0.3).unwrap();
        let b = fine.estimate_sorted(&RS, 0.3).unwrap();
        assert_relative_eq!(a, b, max_relative = 2e-2);
    }

    #[test]
    fn test_noise_kfac_ratio() {
        let noisy = MleOptions::builder()
            .noise(Some(NoiseModel::GaussianHaro))
            .sigma(0.2);
        let biased = estimator(noisy.clone()).estimate_sorted(&RS, 0.2).unwrap();
        let unbiased = estimator(noisy.unbiased(true)).estimate_sorted(&RS, 0.2).unwrap();
        assert!(biased.is_finite());
        assert_relative_eq!(unbiased / biased, 3.0 / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let opts = MleOptions::builder()
            .noise(Some(NoiseModel::GaussianHaro))
            .sigma(0.2)
            .integral_approximation(IntegralApproximation::GuaranteedConvergence)
            .build()
            .unwrap();
        let first = PointwiseEstimator::from_options(&opts).unwrap();
        let second = PointwiseEstimator::from_options(&opts).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.estimate_sorted(&RS, 0.2).unwrap(),
            second.estimate_sorted(&RS, 0.2).unwrap()
        );
    }
}
