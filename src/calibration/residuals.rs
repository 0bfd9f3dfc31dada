//! Residual strategies: the objective each bounded solve minimizes.
//!
//! Both strategies return an augmented residual vector (fit residuals
//! followed by regularization penalty terms) whose sum of squares is the
//! quantity the solver minimizes. The penalty anchors the new fit to the
//! previous tick's parameters, damping tick-to-tick jitter in the poorly
//! identified directions of the SVI objective.

use serde::{Deserialize, Serialize};

use crate::vol::SviParams;

/// Guards the Tikhonov scale and relative-drift denominators.
const EPS: f64 = 1e-6;

/// Regularization strategy, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidualStrategy {
    /// Plain least squares plus a single rho drift penalty at strength
    /// `sqrt(lambda)`.
    Simple,
    /// Scale-normalized residuals with stiffened penalties on rho drift and
    /// relative b drift.
    Tikhonov,
}

impl ResidualStrategy {
    /// Parse a method name, case-insensitively.
    ///
    /// Unrecognized names fall back to `Simple`, matching the permissive
    /// engine construction contract.
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_lowercase().as_str() {
            "tikhonov" => Self::Tikhonov,
            "simple" => Self::Simple,
            other => {
                #[cfg(feature = "logging")]
                tracing::debug!(method = other, "unknown method, falling back to simple");
                let _ = other;
                Self::Simple
            }
        }
    }

    /// Build the augmented residual vector for optimizer iterate `x`.
    ///
    /// `prior` is the warm-start reference (the engine's current
    /// parameters) and `lambda` the selected regularization strength.
    pub fn residuals(
        &self,
        x: &[f64],
        ks: &[f64],
        market_w: &[f64],
        prior: &SviParams,
        lambda: f64,
    ) -> Vec<f64> {
        let Some(params) = SviParams::from_slice(x) else {
            // Malformed iterate: make it maximally unattractive.
            return vec![1e6; ks.len() + 2];
        };

        match self {
            Self::Simple => simple_residuals(params, ks, market_w, prior, lambda),
            Self::Tikhonov => tikhonov_residuals(params, ks, market_w, prior, lambda),
        }
    }
}

fn simple_residuals(
    params: SviParams,
    ks: &[f64],
    market_w: &[f64],
    prior: &SviParams,
    lambda: f64,
) -> Vec<f64> {
    let mut out: Vec<f64> = ks
        .iter()
        .zip(market_w.iter())
        .map(|(&k, &w)| params.total_variance(k) - w)
        .collect();
    out.push(lambda.sqrt() * (params.rho - prior.rho));
    out
}

fn tikhonov_residuals(
    params: SviParams,
    ks: &[f64],
    market_w: &[f64],
    prior: &SviParams,
    lambda: f64,
) -> Vec<f64> {
    // Normalize by the tick's variance level so lambda is comparable across
    // low- and high-variance regimes.
    let mean_w = market_w.iter().sum::<f64>() / market_w.len().max(1) as f64;
    let scale = 1.0 / (mean_w + EPS);

    let mut out: Vec<f64> = ks
        .iter()
        .zip(market_w.iter())
        .map(|(&k, &w)| (params.total_variance(k) - w) * scale)
        .collect();

    let stiff = lambda * scale * 10.0;
    out.push(stiff.sqrt() * (params.rho - prior.rho));
    // Relative drift in b stabilizes wing steepness tick-to-tick.
    out.push((stiff * 0.2).sqrt() * (params.b - prior.b) / (prior.b + EPS));
    out
}
