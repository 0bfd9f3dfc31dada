//! Stateful tick-by-tick SVI calibration.
//!
//! The module splits into:
//! - common solver abstractions (`BoxConstraints`, `ConvergenceInfo`),
//! - a bounded Levenberg-Marquardt optimizer,
//! - the two residual strategies (plain least squares / Tikhonov drift
//!   penalty),
//! - the interleaved cross-validation lambda selector,
//! - the warm-started per-tick engine with its calibration history,
//! - fit and stability diagnostics.

pub mod core;
pub mod diagnostics;
pub mod engine;
pub mod lambda;
pub mod optimizers;
pub mod residuals;

pub use self::core::{BoxConstraints, ConvergenceInfo, TerminationReason};
pub use diagnostics::{calibrate_unregularized, rho_jitter, rmse};
pub use engine::{HistoryEntry, TickCalibrator};
pub use lambda::{LAMBDA_GRID, select_lambda};
pub use optimizers::{LmOptions, OptimisationResult, levenberg_marquardt};
pub use residuals::ResidualStrategy;
