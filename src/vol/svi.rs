//! Raw SVI parameterization of the total implied-variance smile.
//!
//! SVI models total variance as a function of log-moneyness `k`:
//!
//! w(k) = a + b * (rho * (k - m) + sqrt((k - m)^2 + sigma^2))
//!
//! References:
//! - Gatheral (2004, 2006), SVI parameterization and static-arbitrage checks.
//! - Gatheral and Jacquier (2014), "Arbitrage-Free SVI Volatility Surfaces".

use serde::{Deserialize, Serialize};

/// Number of raw SVI parameters: `[a, b, rho, m, sigma]`.
pub const N_PARAMS: usize = 5;

/// Raw SVI parameter set.
///
/// The domain expects `b >= 0`, `rho` in `[-1, 1]`, `sigma > 0` and
/// `a + b*sigma*sqrt(1 - rho^2) >= 0` (non-negative minimum variance).
/// None of that is enforced here; the calibration engine keeps iterates
/// inside externally supplied box bounds instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SviParams {
    /// Overall variance level.
    pub a: f64,
    /// Wing slope magnitude.
    pub b: f64,
    /// Skew direction, in `[-1, 1]`.
    pub rho: f64,
    /// Horizontal shift of the smile minimum.
    pub m: f64,
    /// Smile curvature at the minimum.
    pub sigma: f64,
}

impl SviParams {
    /// Decode an optimizer vector ordered `[a, b, rho, m, sigma]`.
    pub fn from_slice(x: &[f64]) -> Option<Self> {
        if x.len() != N_PARAMS {
            return None;
        }
        Some(Self {
            a: x[0],
            b: x[1],
            rho: x[2],
            m: x[3],
            sigma: x[4],
        })
    }

    /// Encode into the optimizer ordering `[a, b, rho, m, sigma]`.
    pub fn to_vec(self) -> Vec<f64> {
        vec![self.a, self.b, self.rho, self.m, self.sigma]
    }

    /// Total variance `w(k)` at log-moneyness `k`.
    ///
    /// Pure arithmetic: pathological inputs (e.g. `sigma = 0`) are not
    /// rejected, NaN and infinities propagate.
    pub fn total_variance(&self, k: f64) -> f64 {
        let x = k - self.m;
        self.a + self.b * (self.rho * x + (x * x + self.sigma * self.sigma).sqrt())
    }

    /// Slope of total variance, `dw/dk = b*(rho + (k-m)/sqrt((k-m)^2 + sigma^2))`.
    ///
    /// Used for slope-risk diagnostics only, not by the calibration loop.
    pub fn dw_dk(&self, k: f64) -> f64 {
        let x = k - self.m;
        self.b * (self.rho + x / (x * x + self.sigma * self.sigma).sqrt())
    }
}

/// Evaluate the SVI curve over a strike grid.
pub fn forward_model(ks: &[f64], params: SviParams) -> Vec<f64> {
    ks.iter().map(|&k| params.total_variance(k)).collect()
}
