//! Regularization-strength selection by interleaved cross-validation.
//!
//! Every tick, each candidate strength gets one loose-tolerance fit on the
//! training partition and one RMSE evaluation on the held-out partition.
//! The split is by position modulo 4 rather than contiguous blocks so both
//! folds span the full strike range and stay representative of the smile
//! shape. A brute-force scan over a short fixed grid, re-run per tick; no
//! interpolation between candidates.

use crate::calibration::core::BoxConstraints;
use crate::calibration::diagnostics::rmse;
use crate::calibration::optimizers::{LmOptions, levenberg_marquardt};
use crate::calibration::residuals::ResidualStrategy;
use crate::vol::{SviParams, forward_model};

/// Candidate regularization strengths, scanned in ascending order.
pub const LAMBDA_GRID: [f64; 5] = [1e-4, 1e-3, 1e-2, 1e-1, 0.5];

/// Validation fold: every index with `index % FOLD == 0`.
const FOLD: usize = 4;

/// Pick the candidate with the lowest held-out RMSE.
///
/// Each candidate fit is warm-started from `start` (the engine's current
/// parameters), which also serves as the penalty prior. Ties keep the
/// first candidate encountered, i.e. the smallest strength, because the
/// scan is ascending and replacement is strict less-than.
pub fn select_lambda(
    strategy: ResidualStrategy,
    start: &SviParams,
    bounds: &BoxConstraints,
    ks: &[f64],
    market_w: &[f64],
) -> Result<f64, String> {
    let mut train_ks = Vec::with_capacity(ks.len());
    let mut train_w = Vec::with_capacity(ks.len());
    let mut val_ks = Vec::with_capacity(ks.len() / FOLD + 1);
    let mut val_w = Vec::with_capacity(ks.len() / FOLD + 1);

    for (i, (&k, &w)) in ks.iter().zip(market_w.iter()).enumerate() {
        if i % FOLD == 0 {
            val_ks.push(k);
            val_w.push(w);
        } else {
            train_ks.push(k);
            train_w.push(w);
        }
    }

    let x0 = start.to_vec();
    let options = LmOptions::loose();

    let mut best_lambda = LAMBDA_GRID[0];
    let mut best_score = f64::INFINITY;

    for &candidate in LAMBDA_GRID.iter() {
        let fit = levenberg_marquardt(&x0, bounds, options, |x| {
            strategy.residuals(x, &train_ks, &train_w, start, candidate)
        })?;

        let Some(params) = SviParams::from_slice(&fit.x) else {
            return Err("lambda search produced malformed parameter vector".to_string());
        };
        let val_pred = forward_model(&val_ks, params);
        let score = rmse(&val_pred, &val_w);

        if score < best_score {
            best_score = score;
            best_lambda = candidate;
        }
    }

    #[cfg(feature = "logging")]
    tracing::debug!(lambda = best_lambda, score = best_score, "lambda selected");

    Ok(best_lambda)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Vec<f64> {
        (0..n).map(|i| -1.0 + 2.0 * i as f64 / (n - 1) as f64).collect()
    }

    fn svi_bounds() -> BoxConstraints {
        BoxConstraints::new(
            vec![-1.0, 1e-3, -0.999, -1.0, 1e-2],
            vec![1.0, 2.0, 0.999, 1.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn returns_a_grid_member() {
        let truth = SviParams {
            a: 0.04,
            b: 0.1,
            rho: -0.7,
            m: 0.0,
            sigma: 0.1,
        };
        let start = SviParams {
            a: 0.05,
            b: 0.15,
            rho: -0.5,
            m: 0.0,
            sigma: 0.15,
        };
        let ks = grid(24);
        let market = forward_model(&ks, truth);

        for strategy in [ResidualStrategy::Simple, ResidualStrategy::Tikhonov] {
            let l = select_lambda(strategy, &start, &svi_bounds(), &ks, &market).unwrap();
            assert!(
                LAMBDA_GRID.contains(&l),
                "selected lambda {l} not in candidate grid"
            );
        }
    }

    #[test]
    fn noiseless_data_prefers_weak_regularization() {
        // With an exact observation any drift penalty only biases the fit,
        // so the held-out score is monotone in lambda and the smallest
        // candidate wins.
        let truth = SviParams {
            a: 0.04,
            b: 0.1,
            rho: -0.7,
            m: 0.0,
            sigma: 0.1,
        };
        let start = SviParams {
            a: 0.05,
            b: 0.15,
            rho: -0.3,
            m: 0.0,
            sigma: 0.15,
        };
        let ks = grid(32);
        let market = forward_model(&ks, truth);

        let l = select_lambda(ResidualStrategy::Simple, &start, &svi_bounds(), &ks, &market)
            .unwrap();
        assert!(l <= 1e-3, "expected weak lambda on noiseless data, got {l}");
    }

    #[test]
    fn two_points_still_split_into_both_folds() {
        let start = SviParams {
            a: 0.05,
            b: 0.1,
            rho: -0.5,
            m: 0.0,
            sigma: 0.1,
        };
        let ks = [-0.5, 0.5];
        let market = [0.09, 0.05];
        let l = select_lambda(ResidualStrategy::Simple, &start, &svi_bounds(), &ks, &market)
            .unwrap();
        assert!(LAMBDA_GRID.contains(&l));
    }
}
