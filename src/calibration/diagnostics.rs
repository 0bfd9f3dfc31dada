//! Fit and stability diagnostics.

use crate::calibration::core::{BoxConstraints, ConvergenceInfo};
use crate::calibration::engine::HistoryEntry;
use crate::calibration::optimizers::{LmOptions, levenberg_marquardt};
use crate::vol::SviParams;

/// Root-mean-square error between a model curve and the observation.
///
/// Returns 0 for empty input; a length mismatch is the caller's bug and is
/// truncated to the shorter sequence.
pub fn rmse(model: &[f64], market: &[f64]) -> f64 {
    let n = model.len().min(market.len());
    if n == 0 {
        return 0.0;
    }
    let sum_sq: f64 = model
        .iter()
        .zip(market.iter())
        .map(|(m, w)| (m - w) * (m - w))
        .sum();
    (sum_sq / n as f64).sqrt()
}

/// Total absolute first difference of fitted rho across the history.
///
/// The stability metric the regularization exists to reduce: insertion
/// order of the history is the time axis.
pub fn rho_jitter(history: &[HistoryEntry]) -> f64 {
    history
        .windows(2)
        .map(|w| (w[1].params.rho - w[0].params.rho).abs())
        .sum()
}

/// One tight unregularized fit, used by instability diagnostics to show
/// what plain least squares does without a drift penalty.
///
/// Unlike the engine this carries no state: every call starts from the
/// supplied guess.
pub fn calibrate_unregularized(
    ks: &[f64],
    market_w: &[f64],
    initial: &SviParams,
    bounds: &BoxConstraints,
) -> Result<(SviParams, ConvergenceInfo), String> {
    let fit = levenberg_marquardt(&initial.to_vec(), bounds, LmOptions::tight(), |x| {
        let Some(p) = SviParams::from_slice(x) else {
            return vec![1e6; ks.len()];
        };
        ks.iter()
            .zip(market_w.iter())
            .map(|(&k, &w)| p.total_variance(k) - w)
            .collect()
    })?;

    let params = SviParams::from_slice(&fit.x)
        .ok_or_else(|| "unregularized fit produced malformed parameter vector".to_string())?;
    Ok((params, fit.convergence))
}
