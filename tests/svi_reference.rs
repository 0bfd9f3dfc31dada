//! SVI forward-model reference tests.
//!
//! Sources:
//! - Gatheral & Jacquier (2014), "Arbitrage-Free SVI Volatility Surfaces",
//!   arXiv:1204.0646
//!
//! Raw parameterization: w(k) = a + b*(rho*(k-m) + sqrt((k-m)^2 + sigma^2))
//! where w is total implied variance and k is log-moneyness.

use tickvol::vol::{SviParams, forward_model};

// Gatheral-Jacquier style parameter set
// a=0.04, b=0.4, rho=-0.4, m=0.05, sigma=0.1
const SET_A: SviParams = SviParams {
    a: 0.04,
    b: 0.4,
    rho: -0.4,
    m: 0.05,
    sigma: 0.1,
};

// The session ground truth used throughout the synthetic scenarios.
const TRUTH: SviParams = SviParams {
    a: 0.04,
    b: 0.1,
    rho: -0.7,
    m: 0.0,
    sigma: 0.1,
};

#[test]
fn set_a_atm_total_variance() {
    // At k=0: w(0) = 0.04 + 0.4*(-0.4*(-0.05) + sqrt(0.0025 + 0.01))
    let w = SET_A.total_variance(0.0);
    let expected = 0.04 + 0.4 * (-0.4 * (0.0 - 0.05) + ((0.0 - 0.05_f64).powi(2) + 0.01).sqrt());
    let err = (w - expected).abs();
    assert!(err < 1e-12, "SET_A ATM: got {w}, expected {expected}");
}

#[test]
fn set_a_wing_total_variance() {
    let k = 0.5;
    let w = SET_A.total_variance(k);
    let expected = 0.04 + 0.4 * (-0.4 * (k - 0.05) + ((k - 0.05_f64).powi(2) + 0.01).sqrt());
    assert!((w - expected).abs() < 1e-12);
}

#[test]
fn smile_center_identity() {
    // At k = m the linear term drops out: w(m) = a + b*sigma exactly.
    let w = TRUTH.total_variance(TRUTH.m);
    let expected = TRUTH.a + TRUTH.b * TRUTH.sigma;
    assert!(
        (w - expected).abs() < 1e-14,
        "w(m) = {w}, expected a + b*sigma = {expected}"
    );
}

#[test]
fn total_variance_positive_across_the_strike_axis() {
    // a > 0, moderate b, |rho| < 1: the no-arbitrage floor holds for all k.
    for i in -30..=30 {
        let k = i as f64 * 0.1;
        let w = TRUTH.total_variance(k);
        assert!(w > 0.0, "w({k}) = {w} must be positive");
    }
}

#[test]
fn negative_rho_steepens_the_put_wing() {
    let w_put = TRUTH.total_variance(-0.8);
    let w_call = TRUTH.total_variance(0.8);
    assert!(
        w_put > w_call,
        "negative rho: w(-0.8)={w_put} should exceed w(0.8)={w_call}"
    );
}

#[test]
fn slope_sign_flips_across_the_smile_minimum() {
    // The minimum sits at k* = m - rho*sigma/sqrt(1-rho^2); slope is
    // negative left of it and positive right of it.
    let k_star = TRUTH.m - TRUTH.rho * TRUTH.sigma / (1.0 - TRUTH.rho * TRUTH.rho).sqrt();
    assert!(TRUTH.dw_dk(k_star - 0.5) < 0.0);
    assert!(TRUTH.dw_dk(k_star + 0.5) > 0.0);
    assert!(TRUTH.dw_dk(k_star).abs() < 1e-12);
}

#[test]
fn forward_model_is_elementwise_total_variance() {
    let ks: Vec<f64> = (-5..=5).map(|i| i as f64 * 0.2).collect();
    let ws = forward_model(&ks, SET_A);
    assert_eq!(ws.len(), ks.len());
    for (k, w) in ks.iter().zip(ws.iter()) {
        assert!((w - SET_A.total_variance(*k)).abs() < 1e-15);
    }
}

#[test]
fn degenerate_sigma_zero_is_piecewise_linear_not_rejected() {
    let p = SviParams {
        sigma: 0.0,
        ..SET_A
    };
    // w(k) = a + b*(rho*(k-m) + |k-m|), finite everywhere.
    let w = p.total_variance(0.3);
    let x: f64 = 0.3 - p.m;
    assert!((w - (p.a + p.b * (p.rho * x + x.abs()))).abs() < 1e-14);
    assert!(w.is_finite());
}
