//! Construction-time validation errors.
//!
//! These are the only errors an `AndersonAccelerator` ever surfaces to a
//! caller — everything that can go wrong inside `accelerate` degrades
//! silently to a diagnostic tag instead (see `diagnostics::AccelerationTag`).

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum AccelerationError {
    #[error("history memory m={requested} must be greater than 2")]
    InvalidMem { requested: usize },

    #[error("vector dimension d={requested} must be greater than 0")]
    InvalidDim { requested: usize },

    #[error("ByIteration/ByIterationOrAccuracy start_iter={start_iter} must be >= 2")]
    InvalidStartIter { start_iter: usize },

    #[error("ByAccuracy/ByIterationOrAccuracy epsilon={epsilon} must be >= 0")]
    InvalidEpsilon { epsilon: f64 },
}
