//! Configuration schema and loading.
//!
//! The schema is serde-derived and validated eagerly at load time so every
//! structural problem surfaces before the first tick, never during a
//! calibration call. Unknown top-level fields are ignored on purpose:
//! session files may carry sections for other tools.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TickVolError};
use crate::vol::{N_PARAMS, SviParams};

/// Box bounds for the five raw SVI parameters, ordered
/// `[a, b, rho, m, sigma]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Model block: name, warm-start seed and parameter bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub initial_guess: Vec<f64>,
    pub bounds: Bounds,
}

/// Synthetic session block: ground truth, tick count, noise and the
/// observation grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub true_params: Vec<f64>,
    pub n_ticks: usize,
    pub noise_level: f64,
    pub strike_range: [f64; 2],
    pub n_points: usize,
}

impl SimConfig {
    /// Decode the ground-truth parameter vector.
    pub fn true_svi(&self) -> Result<SviParams> {
        SviParams::from_slice(&self.true_params).ok_or_else(|| {
            TickVolError::configuration(format!(
                "sim.true_params must have exactly {N_PARAMS} elements"
            ))
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub sim: SimConfig,
}

impl Config {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)
            .map_err(|e| TickVolError::configuration(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Structural validation beyond what serde can express.
    pub fn validate(&self) -> Result<()> {
        for (field, v) in [
            ("model.initial_guess", &self.model.initial_guess),
            ("model.bounds.lower", &self.model.bounds.lower),
            ("model.bounds.upper", &self.model.bounds.upper),
            ("sim.true_params", &self.sim.true_params),
        ] {
            if v.len() != N_PARAMS {
                return Err(TickVolError::configuration(format!(
                    "{field} must have exactly {N_PARAMS} elements: [a, b, rho, m, sigma], got {}",
                    v.len()
                )));
            }
        }

        for i in 0..N_PARAMS {
            if self.model.bounds.lower[i] > self.model.bounds.upper[i] {
                return Err(TickVolError::configuration(format!(
                    "bounds inverted at index {i}: [{}, {}]",
                    self.model.bounds.lower[i], self.model.bounds.upper[i]
                )));
            }
        }

        if self.sim.n_points < 2 {
            return Err(TickVolError::configuration(
                "sim.n_points must be at least 2 for cross-validation",
            ));
        }
        if !self.sim.noise_level.is_finite() || self.sim.noise_level < 0.0 {
            return Err(TickVolError::configuration(format!(
                "sim.noise_level must be finite and non-negative, got {}",
                self.sim.noise_level
            )));
        }

        Ok(())
    }

    /// Built-in session used by the demo binary and the documentation
    /// examples: the canonical equity-like smile with a gentle noise level.
    pub fn demo() -> Self {
        Self {
            model: ModelConfig {
                name: "svi_raw".to_string(),
                initial_guess: vec![0.05, 0.15, -0.5, 0.0, 0.15],
                bounds: Bounds {
                    lower: vec![-1.0, 1e-3, -0.999, -1.0, 1e-2],
                    upper: vec![1.0, 2.0, 0.999, 1.0, 2.0],
                },
            },
            sim: SimConfig {
                true_params: vec![0.04, 0.1, -0.7, 0.0, 0.1],
                n_ticks: 200,
                noise_level: 0.005,
                strike_range: [-1.0, 1.0],
                n_points: 50,
            },
        }
    }
}

/// Load and validate a JSON configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path).map_err(|e| {
        TickVolError::configuration(format!("failed to read config '{}': {e}", path.display()))
    })?;
    Config::from_json_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config_is_valid() {
        assert!(Config::demo().validate().is_ok());
        assert!(Config::demo().sim.true_svi().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let cfg = Config::demo();
        let json = serde_json::to_string(&cfg).unwrap();
        let back = Config::from_json_str(&json).unwrap();
        assert_eq!(back.model.initial_guess, cfg.model.initial_guess);
        assert_eq!(back.sim.n_ticks, cfg.sim.n_ticks);
    }

    #[test]
    fn rejects_four_element_bounds() {
        let mut cfg = Config::demo();
        cfg.model.bounds.upper.pop();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("exactly 5"));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut cfg = Config::demo();
        cfg.model.bounds.lower[2] = 2.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_noise() {
        let mut cfg = Config::demo();
        cfg.sim.noise_level = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_single_point_grid() {
        let mut cfg = Config::demo();
        cfg.sim.n_points = 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut value = serde_json::to_value(Config::demo()).unwrap();
        value["filter"] = serde_json::json!({ "n_particles": 1000 });
        let raw = serde_json::to_string(&value).unwrap();
        assert!(Config::from_json_str(&raw).is_ok());
    }

    #[test]
    fn bad_json_is_a_configuration_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TickVolError::Configuration { .. }));
    }
}
