//! Tickvol is a stateful SVI calibration engine: it fits the 5-parameter
//! raw SVI total-variance curve to a noisy, periodically refreshed market
//! observation, tick by tick, and tracks how stable the fitted parameters
//! stay over the session.
//!
//! The interesting part is the per-tick pipeline:
//! - a residual strategy (plain least squares or a Tikhonov-style drift
//!   penalty against the previous tick's fit),
//! - a bounded Levenberg-Marquardt solve with hard box constraints,
//! - an interleaved 4-fold cross-validation that picks the regularization
//!   strength from a fixed candidate grid before every final fit.
//!
//! References used across modules:
//! - Gatheral (2004, 2006), raw SVI parameterization.
//! - Gatheral and Jacquier (2014), arbitrage-free SVI surfaces.
//! - Levenberg (1944), Marquardt (1963), damped least squares.
//! - Nocedal and Wright, *Numerical Optimization* (2nd ed.), Ch. 10.
//!
//! # Quick start
//! ```rust
//! use tickvol::config::Config;
//! use tickvol::calibration::TickCalibrator;
//! use tickvol::vol::forward_model;
//!
//! let cfg = Config::demo();
//! let mut engine = TickCalibrator::new(&cfg.model, "tikhonov").unwrap();
//!
//! let ks: Vec<f64> = (0..50).map(|i| -1.0 + 2.0 * i as f64 / 49.0).collect();
//! let market_w = forward_model(&ks, cfg.sim.true_svi().unwrap());
//! let fit = engine.calibrate_tick(&ks, &market_w).unwrap();
//! assert!(engine.history().len() == 1 && fit.sigma > 0.0);
//! ```
//!
//! # Feature flags
//! - `logging`: emits `tracing` debug events around each tick calibration.
//!   The core has no logging side effects without it.

pub mod calibration;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod vol;

pub use calibration::{
    BoxConstraints, ConvergenceInfo, HistoryEntry, LAMBDA_GRID, LmOptions, ResidualStrategy,
    TerminationReason, TickCalibrator,
};
pub use config::Config;
pub use error::{Result, TickVolError};
pub use vol::{SviParams, forward_model};
