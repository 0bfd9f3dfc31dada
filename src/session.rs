//! Synthetic market session driver.
//!
//! Generates the noisy observation stream (the truth curve plus i.i.d.
//! Gaussian noise per point) and feeds the same ticks to one engine per
//! regularization method, so the two histories are paired sample-by-sample
//! and the jitter comparison is apples to apples.

use rand::prelude::*;
use rand_distr::{Distribution, Normal};

use crate::calibration::{HistoryEntry, TickCalibrator};
use crate::config::Config;
use crate::error::{Result, TickVolError};
use crate::vol::{SviParams, forward_model};

/// Paired per-method calibration histories for one session.
#[derive(Debug, Clone)]
pub struct SessionHistories {
    pub simple: Vec<HistoryEntry>,
    pub tikhonov: Vec<HistoryEntry>,
}

/// Evenly spaced strike grid over `[range[0], range[1]]`.
pub fn strike_grid(range: [f64; 2], n_points: usize) -> Vec<f64> {
    if n_points < 2 {
        return vec![range[0]];
    }
    let step = (range[1] - range[0]) / (n_points - 1) as f64;
    (0..n_points).map(|i| range[0] + step * i as f64).collect()
}

/// One noisy observation of the truth curve.
pub fn synthetic_tick<R: Rng + ?Sized>(
    rng: &mut R,
    ks: &[f64],
    truth: SviParams,
    noise: &Normal<f64>,
) -> Vec<f64> {
    forward_model(ks, truth)
        .into_iter()
        .map(|w| w + noise.sample(rng))
        .collect()
}

/// Run a full synthetic session with both engines on identical ticks.
///
/// Deterministic for a given seed. Ticks are processed strictly in
/// generation order; each engine's warm start is the previous tick's fit.
pub fn run_session(cfg: &Config, seed: u64) -> Result<SessionHistories> {
    let truth = cfg.sim.true_svi()?;
    let ks = strike_grid(cfg.sim.strike_range, cfg.sim.n_points);

    let noise = Normal::new(0.0, cfg.sim.noise_level)
        .map_err(|e| TickVolError::configuration(format!("invalid noise level: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut simple = TickCalibrator::new(&cfg.model, "simple")?;
    let mut tikhonov = TickCalibrator::new(&cfg.model, "tikhonov")?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        model = %cfg.model.name,
        n_ticks = cfg.sim.n_ticks,
        noise = cfg.sim.noise_level,
        "session started"
    );

    for _ in 0..cfg.sim.n_ticks {
        let market_w = synthetic_tick(&mut rng, &ks, truth, &noise);
        simple.calibrate_tick(&ks, &market_w)?;
        tikhonov.calibrate_tick(&ks, &market_w)?;
    }

    Ok(SessionHistories {
        simple: simple.history().to_vec(),
        tikhonov: tikhonov.history().to_vec(),
    })
}
