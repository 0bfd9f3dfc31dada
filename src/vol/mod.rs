//! SVI total-variance model primitives.

mod svi;

pub use svi::{N_PARAMS, SviParams, forward_model};
