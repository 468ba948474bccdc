//! Adaptive quadrature for the noise-corrected likelihood
//!
//! Integration uses the 15-point Gauss-Kronrod rule with its embedded 7-point
//! Gauss rule. The error estimate of a segment is `|K15 - G7|`. Segments are
//! kept in a max-heap keyed by that estimate and the worst one is bisected
//! until the summed error drops below `max(epsabs, epsrel * |I|)` or the
//! subdivision limit is reached (the QUADPACK `qag` strategy). No node lies on
//! a segment endpoint, so integrands with an integrable singularity at `0`,
//! such as `ln(Rk / x)`, are never evaluated there.

use crate::noise::TransitionDensity;
use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

/// Kronrod abscissae on [-1, 1]; odd indices are the Gauss nodes, the last is 0
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for nodes XGK[1], XGK[3], XGK[5] and the center
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Default relative and absolute tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-2;

/// Default maximum number of segments
pub const DEFAULT_LIMIT: usize = 50;

/// Width of the integration range beyond `Rk`, in units of `sigma`
pub const UPPER_BOUND_SIGMAS: f64 = 100.0;

/// Outcome of one adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub abs_error: f64,
    pub segments: usize,
    /// Whether the tolerance was met before the segment limit
    pub converged: bool,
}

/// Numerator and denominator integrals for one neighbor radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborIntegrals {
    pub numerator: f64,
    pub denominator: f64,
}

impl NeighborIntegrals {
    /// `numerator / denominator`, NaN when the denominator vanished
    pub fn ratio(&self) -> f64 {
        if self.denominator == 0.0 {
            f64::NAN
        } else {
            self.numerator / self.denominator
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.error) == OrderedFloat(other.error)
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        OrderedFloat(self.error).cmp(&OrderedFloat(other.error))
    }
}

fn gauss_kronrod_15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Segment {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for (j, (&x, &w)) in XGK[..7].iter().zip(&WGK[..7]).enumerate() {
        let dx = half * x;
        let pair = f(center - dx) + f(center + dx);
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    }
}

/// Adaptive one-dimensional integrator with a fixed tolerance contract
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralEvaluator {
    epsabs: f64,
    epsrel: f64,
    limit: usize,
}

impl Default for IntegralEvaluator {
    fn default() -> Self {
        Self {
            epsabs: DEFAULT_TOLERANCE,
            epsrel: DEFAULT_TOLERANCE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl IntegralEvaluator {
    pub fn new(epsabs: f64, epsrel: f64, limit: usize) -> Self {
        Self {
            epsabs,
            epsrel,
            limit: limit.max(1),
        }
    }

    /// Integrate `f` over `[a, b]`, starting from the partition given by the
    /// interior `breakpoints` (points outside `(a, b)` are ignored)
    pub fn integrate<F>(&self, f: F, a: f64, b: f64, breakpoints: &[f64]) -> Quadrature
    where
        F: Fn(f64) -> f64,
    {
        let mut edges: Vec<f64> = breakpoints
            .iter()
            .copied()
            .filter(|&p| p > a && p < b)
            .collect();
        edges.push(a);
        edges.push(b);
        edges.sort_by_key(|&p| OrderedFloat(p));
        edges.dedup();

        let mut heap: BinaryHeap<Segment> = edges
            .windows(2)
            .map(|w| gauss_kronrod_15(&f, w[0], w[1]))
            .collect();

        loop {
            let value: f64 = heap.iter().map(|s| s.value).sum();
            let abs_error: f64 = heap.iter().map(|s| s.error).sum();
            let tolerance = self.epsabs.max(self.epsrel * value.abs());

            // NaN errors fail the comparison and stop refinement
            let converged = abs_error <= tolerance;
            if converged || !abs_error.is_finite() || heap.len() >= self.limit {
                return Quadrature {
                    value,
                    abs_error,
                    segments: heap.len(),
                    converged,
                };
            }

            let Some(worst) = heap.pop() else {
                return Quadrature {
                    value,
                    abs_error,
                    segments: 0,
                    converged,
                };
            };
            let mid = 0.5 * (worst.a + worst.b);
            heap.push(gauss_kronrod_15(&f, worst.a, mid));
            heap.push(gauss_kronrod_15(&f, mid, worst.b));
        }
    }

    /// Compute both likelihood integrals for neighbor radius `rj`
    ///
    /// ```text
    /// numerator   = ∫₀^Rpr density(x, rj) · ln(rk / x) dx
    /// denominator = ∫₀^Rpr density(x, rj) dx
    /// ```
    ///
    /// with `Rpr = rk + 100·sigma`. The initial partition splits at `rj` and
    /// `rj ± 5·sigma` so a narrow noise peak is never straddled by a single
    /// coarse segment.
    pub fn neighbor_integrals<D: TransitionDensity + ?Sized>(
        &self,
        density: &D,
        rj: f64,
        rk: f64,
        sigma: f64,
        noise_dim: Option<usize>,
    ) -> NeighborIntegrals {
        let upper = rk + UPPER_BOUND_SIGMAS * sigma;
        let breakpoints = [rj - 5.0 * sigma, rj, rj + 5.0 * sigma];

        let numerator = self.integrate(
            |x| density.density(x, rj, sigma, noise_dim) * (rk / x).ln(),
            0.0,
            upper,
            &breakpoints,
        );
        let denominator = self.integrate(
            |x| density.density(x, rj, sigma, noise_dim),
            0.0,
            upper,
            &breakpoints,
        );

        NeighborIntegrals {
            numerator: numerator.value,
            denominator: denominator.value,
        }
    }
}
