//! Session reporting: CSV export and the console summary table.
//!
//! Formatting lives in one place so the calibration code stays clean and
//! output changes are localized. The export is meant to be easy to consume
//! in spreadsheets or downstream notebooks.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::calibration::{HistoryEntry, rho_jitter};
use crate::error::{Result, TickVolError};
use crate::session::SessionHistories;

/// Keeps the efficiency index finite when a session has zero error or
/// zero jitter.
const EFFICIENCY_EPS: f64 = 1e-10;

/// Session-level summary statistics for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub avg_rmse: f64,
    pub jitter: f64,
    pub efficiency: f64,
    pub non_converged_ticks: usize,
}

/// Aggregate a calibration history into summary statistics.
pub fn summarize(history: &[HistoryEntry]) -> SessionSummary {
    let n = history.len().max(1) as f64;
    let avg_rmse = history.iter().map(|e| e.rmse).sum::<f64>() / n;
    let jitter = rho_jitter(history);
    SessionSummary {
        avg_rmse,
        jitter,
        efficiency: 1.0 / (avg_rmse * jitter + EFFICIENCY_EPS),
        non_converged_ticks: history.iter().filter(|e| !e.converged).count(),
    }
}

/// Write the paired per-tick results to CSV.
///
/// Columns: tick, per-method rho and RMSE, and the lambda the Tikhonov
/// engine selected that tick.
pub fn write_results_csv(path: &Path, histories: &SessionHistories) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        TickVolError::configuration(format!(
            "failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    let io_err =
        |e: std::io::Error| TickVolError::configuration(format!("failed to write CSV: {e}"));

    writeln!(file, "tick,rho_ls,rmse_ls,rho_tikh,rmse_tikh,lambda_tikh").map_err(io_err)?;

    let n = histories.simple.len().min(histories.tikhonov.len());
    for t in 0..n {
        let ls = &histories.simple[t];
        let tikh = &histories.tikhonov[t];
        writeln!(
            file,
            "{t},{:.10},{:.10},{:.10},{:.10},{}",
            ls.params.rho, ls.rmse, tikh.params.rho, tikh.rmse, tikh.lambda
        )
        .map_err(io_err)?;
    }

    Ok(())
}

/// Render the final performance comparison as a fixed-width table.
pub fn format_summary(simple: &SessionSummary, tikhonov: &SessionSummary) -> String {
    let sep = "=".repeat(65);
    let mut out = String::new();
    out.push_str(&sep);
    out.push_str("\n            FINAL SESSION PERFORMANCE REPORT\n");
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!(
        "{:<26}{:>18}{:>18}\n",
        "Metric", "Simple LS", "Tikhonov"
    ));
    out.push_str(&format!(
        "{:<26}{:>18.6}{:>18.6}\n",
        "Avg OOS RMSE", simple.avg_rmse, tikhonov.avg_rmse
    ));
    out.push_str(&format!(
        "{:<26}{:>18.6}{:>18.6}\n",
        "Total Parameter Jitter", simple.jitter, tikhonov.jitter
    ));
    out.push_str(&format!(
        "{:<26}{:>18.2}{:>18.2}\n",
        "Efficiency Index", simple.efficiency, tikhonov.efficiency
    ));
    out.push_str(&format!(
        "{:<26}{:>18}{:>18}\n",
        "Non-converged Ticks", simple.non_converged_ticks, tikhonov.non_converged_ticks
    ));
    out.push_str(&sep);
    out.push('\n');

    if simple.jitter > 0.0 {
        let improvement = (1.0 - tikhonov.jitter / simple.jitter) * 100.0;
        out.push_str(&format!(
            "CONCLUSION: Tikhonov reduced parameter jitter by {improvement:.1}%\n"
        ));
        out.push_str(&sep);
        out.push('\n');
    }

    out
}
