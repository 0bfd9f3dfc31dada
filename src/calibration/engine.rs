//! The stateful per-tick calibration engine.
//!
//! One engine instance owns one regularization method, the box bounds, the
//! warm-start parameters and the time-ordered history, and persists for
//! the life of a session. Ticks must arrive in order: each tick's starting
//! point is the previous tick's result, so reordering silently changes the
//! optimization landscape and invalidates the jitter metric. The engine
//! does no internal locking; independent instances share nothing and may
//! run on independent threads.

use serde::{Deserialize, Serialize};

use crate::calibration::core::BoxConstraints;
use crate::calibration::diagnostics::rmse;
use crate::calibration::lambda::select_lambda;
use crate::calibration::optimizers::{LmOptions, levenberg_marquardt};
use crate::calibration::residuals::ResidualStrategy;
use crate::config::ModelConfig;
use crate::error::{Result, TickVolError};
use crate::vol::{N_PARAMS, SviParams, forward_model};

/// Immutable record appended once per successfully calibrated tick.
///
/// `converged` is retained from the final solve but never gates the state
/// update: a best-effort fit is accepted as the next warm start, and the
/// flag lets callers detect and report non-convergence after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub params: SviParams,
    pub lambda: f64,
    pub rmse: f64,
    pub converged: bool,
}

/// Warm-started SVI calibrator with per-tick cross-validated
/// regularization.
#[derive(Debug, Clone)]
pub struct TickCalibrator {
    strategy: ResidualStrategy,
    bounds: BoxConstraints,
    current: SviParams,
    history: Vec<HistoryEntry>,
}

impl TickCalibrator {
    /// Build an engine from a validated model configuration.
    ///
    /// The bounds and initial guess must have exactly five entries; a
    /// mismatch is a configuration error here, never at tick time. The
    /// method name is case-insensitive and unknown names fall back to
    /// `simple`.
    pub fn new(model: &ModelConfig, method: &str) -> Result<Self> {
        let current = SviParams::from_slice(&model.initial_guess).ok_or_else(|| {
            TickVolError::configuration(format!(
                "initial_guess must have exactly {N_PARAMS} elements: [a, b, rho, m, sigma]"
            ))
        })?;

        let bounds = BoxConstraints::new(model.bounds.lower.clone(), model.bounds.upper.clone())
            .map_err(TickVolError::configuration)?;
        if bounds.dimension() != N_PARAMS {
            return Err(TickVolError::configuration(format!(
                "bounds must have exactly {N_PARAMS} elements: [a, b, rho, m, sigma]"
            )));
        }

        Ok(Self {
            strategy: ResidualStrategy::parse(method),
            bounds,
            current,
            history: Vec::new(),
        })
    }

    /// The regularization strategy fixed at construction.
    pub fn strategy(&self) -> ResidualStrategy {
        self.strategy
    }

    /// Current warm-start parameters (the last accepted fit, or the
    /// initial guess before the first tick).
    pub fn current_params(&self) -> SviParams {
        self.current
    }

    /// Append-only calibration history; index is the tick number.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Calibrate one tick.
    ///
    /// Selects the regularization strength by interleaved cross-validation,
    /// runs the final tight bounded solve over the full observation, then
    /// unconditionally adopts the result as the next warm start and appends
    /// a history entry. A shape error leaves the engine state unchanged.
    pub fn calibrate_tick(&mut self, ks: &[f64], market_w: &[f64]) -> Result<SviParams> {
        if ks.len() != market_w.len() {
            return Err(TickVolError::shape(format!(
                "strikes ({}) and market variances ({}) differ in length",
                ks.len(),
                market_w.len()
            )));
        }
        if ks.len() < 2 {
            return Err(TickVolError::shape(format!(
                "need at least 2 points for interleaved cross-validation, got {}",
                ks.len()
            )));
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            n_points = ks.len(),
            strategy = ?self.strategy,
            "tick calibration started"
        );

        let lambda = select_lambda(self.strategy, &self.current, &self.bounds, ks, market_w)
            .map_err(TickVolError::numerical)?;

        let prior = self.current;
        let strategy = self.strategy;
        let fit = levenberg_marquardt(&prior.to_vec(), &self.bounds, LmOptions::tight(), |x| {
            strategy.residuals(x, ks, market_w, &prior, lambda)
        })
        .map_err(TickVolError::numerical)?;

        let params = SviParams::from_slice(&fit.x).ok_or_else(|| {
            TickVolError::numerical("final solve produced malformed parameter vector")
        })?;

        // Warm start for the next tick, accepted even when non-converged.
        self.current = params;

        let fit_rmse = rmse(&forward_model(ks, params), market_w);
        self.history.push(HistoryEntry {
            params,
            lambda,
            rmse: fit_rmse,
            converged: fit.convergence.converged,
        });

        #[cfg(feature = "logging")]
        tracing::debug!(
            lambda,
            rmse = fit_rmse,
            converged = fit.convergence.converged,
            "tick calibration complete"
        );

        Ok(params)
    }
}
