//! Tail-probability models for the statistical tests.
//!
//! The defaults are deliberate closed-form approximations, not exact
//! CDFs: the normal tail uses the Abramowitz-Stegun 7.1.26 error
//! function polynomial (max absolute error 1.5e-7), and the chi-square
//! tail uses a degrees-of-freedom-anchored heuristic that is linear
//! near the mean and exponential beyond it. Exact distributions can be
//! swapped in through the [`TailProbability`] trait without touching
//! the fusion contract; a Wilson-Hilferty alternative is provided.

/// Capability interface for converting a test statistic to a p-value.
pub trait TailProbability: Send + Sync {
    /// Name of the model (for provenance in diagnostics).
    fn name(&self) -> &'static str;

    /// Convert a statistic to a p-value in [0, 1].
    fn p_value(&self, statistic: f64) -> f64;
}

// ── Normal CDF ──────────────────────────────────────────────────────────

/// Error function via the Abramowitz-Stegun 7.1.26 polynomial.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    // A&S 7.1.26 coefficients.
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Two-tailed p-value for a standard normal statistic.
#[derive(Debug, Default)]
pub struct NormalTwoTailed;

impl TailProbability for NormalTwoTailed {
    fn name(&self) -> &'static str {
        "normal-two-tailed"
    }

    fn p_value(&self, statistic: f64) -> f64 {
        let p = 2.0 * (1.0 - normal_cdf(statistic.abs()));
        p.clamp(0.0, 1.0)
    }
}

// ── Chi-square tail (default heuristic) ─────────────────────────────────

/// Default chi-square tail heuristic, anchored at the degrees of
/// freedom (the distribution's mean):
///
/// ```text
/// p = 1 - statistic / (2 k)            for statistic <= k
/// p = 0.5 * exp(-(statistic - k) / k)  for statistic >  k
/// ```
///
/// Continuous at `statistic == k` (p = 0.5), monotone decreasing. Not a
/// statistically rigorous test; forgiving in the moderate band so that
/// ordinary natural-language samples do not read as significant.
#[derive(Debug)]
pub struct ChiSquareHeuristic {
    /// Degrees of freedom, fixed at the baseline alphabet size.
    pub degrees_of_freedom: f64,
}

impl ChiSquareHeuristic {
    pub fn new(degrees_of_freedom: f64) -> Self {
        Self { degrees_of_freedom }
    }
}

impl TailProbability for ChiSquareHeuristic {
    fn name(&self) -> &'static str {
        "chi-square-heuristic"
    }

    fn p_value(&self, statistic: f64) -> f64 {
        let k = self.degrees_of_freedom;
        if statistic <= 0.0 || k <= 0.0 {
            return 1.0;
        }
        let p = if statistic <= k {
            1.0 - statistic / (2.0 * k)
        } else {
            0.5 * (-(statistic - k) / k).exp()
        };
        p.clamp(0.0, 1.0)
    }
}

// ── Chi-square tail (Wilson-Hilferty alternative) ───────────────────────

/// Upper-tail chi-square p-value via the Wilson-Hilferty approximation:
/// `(X/k)^(1/3)` treated as normal with mean `1 - 2/(9k)` and variance
/// `2/(9k)`. A closer match to the true distribution than the default
/// heuristic; swapping it in shifts detection outcomes in the moderate
/// band (see the fixtures below).
#[derive(Debug)]
pub struct WilsonHilferty {
    /// Degrees of freedom.
    pub degrees_of_freedom: f64,
}

impl WilsonHilferty {
    pub fn new(degrees_of_freedom: f64) -> Self {
        Self { degrees_of_freedom }
    }
}

impl TailProbability for WilsonHilferty {
    fn name(&self) -> &'static str {
        "chi-square-wilson-hilferty"
    }

    fn p_value(&self, statistic: f64) -> f64 {
        let k = self.degrees_of_freedom;
        if statistic <= 0.0 || k <= 0.0 {
            return 1.0;
        }
        let mean = 1.0 - 2.0 / (9.0 * k);
        let sd = (2.0 / (9.0 * k)).sqrt();
        let z = ((statistic / k).cbrt() - mean) / sd;
        (1.0 - normal_cdf(z)).clamp(0.0, 1.0)
    }
}
