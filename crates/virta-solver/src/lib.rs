pub mod assemble;
pub mod config;
pub mod error;
pub mod iterative;
pub mod linear;
pub mod precondition;
pub mod solver;
pub mod stamp;

use std::collections::HashMap;

use faer::c64;

pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

/// Solution of one DC sweep step.
#[derive(Debug, Clone)]
pub struct DcSweepPoint {
    /// Value of the swept source at this step.
    pub sweep_value: f64,
    /// Node voltages and branch currents, keyed like the circuit index map.
    pub solution: HashMap<String, f64>,
}

/// Solution of one AC sweep step.
#[derive(Debug, Clone)]
pub struct AcSweepPoint {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Complex node voltages and branch currents.
    pub solution: HashMap<String, c64>,
}
