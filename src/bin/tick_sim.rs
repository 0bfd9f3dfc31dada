//! Command-line entry point for a synthetic calibration session.
//!
//! Runs both regularization methods over the same noisy tick stream,
//! exports per-tick results to CSV and prints the final comparison table.
//!
//! Usage: `tick_sim [config.json] [out.csv]` — with no arguments the
//! built-in demo session is used and results land in `sim_results.csv`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tickvol::config::{Config, load_config};
use tickvol::report::{format_summary, summarize, write_results_csv};
use tickvol::session::run_session;

const DEFAULT_SEED: u64 = 7;

fn run() -> tickvol::Result<()> {
    let mut args = std::env::args().skip(1);
    let cfg = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => Config::demo(),
    };
    let out_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sim_results.csv"));

    let histories = run_session(&cfg, DEFAULT_SEED)?;
    write_results_csv(&out_path, &histories)?;

    let simple = summarize(&histories.simple);
    let tikhonov = summarize(&histories.tikhonov);
    print!("{}", format_summary(&simple, &tikhonov));
    println!("Results exported to {}", out_path.display());

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tick_sim: {e}");
            ExitCode::FAILURE
        }
    }
}
