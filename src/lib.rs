//! Anderson acceleration engine for fixed-point iterations x <- g(x).
//!
//! Given a sequence of iterates (x_k, g_k) produced by an outer solver
//! (e.g. an operator-splitting algorithm such as ADMM), this crate
//! opportunistically replaces the next candidate g_k with an
//! extrapolated value that, under favorable conditions, converges
//! faster than the underlying fixed-point iteration while preserving
//! the solver's own convergence guarantees.
//!
//! The core sees only plain numeric vectors ([`ndarray::Array1<f64>`])
//! and a scalar iteration counter — it does not own problem structure,
//! does not evaluate g(.) itself, and only ever mutates the candidate g
//! passed to [`accelerator::FixedPointAccelerator::accelerate`].
//!
//! Control flow per outer iteration:
//!
//! ```ignore
//! accelerator.check_activation(iter);
//! accelerator.update_history(&g, &x, iter);
//! accelerator.accelerate(&mut g, &x, iter);
//! ```

pub mod accelerator;
pub mod activation;
pub mod alpha;
pub mod diagnostics;
pub mod error;
pub mod history;
pub mod variant;

pub use accelerator::{AndersonAccelerator, EmptyAccelerator, FixedPointAccelerator};
pub use diagnostics::{AccelerationTag, Diagnostics, RestartReason};
pub use error::AccelerationError;
pub use variant::{Activation, BroydenType, Memory, Regularizer};

#[cfg(test)]
mod tests;
