//! Variant tags selecting the Anderson acceleration algorithm arm.
//!
//! Four independent axes are fixed at construction. Each is a small
//! closed enumeration dispatched by a single `match` per call on the hot
//! path (`AndersonAccelerator::accelerate`) — never behind `dyn Trait`.

use serde::{Deserialize, Serialize};

/// Broyden-type formulation of the normal-equations matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroydenType {
    /// M = XᵀF, rhs = Xᵀf
    TypeI,
    /// M = FᵀF, rhs = Fᵀf
    TypeII,
}

impl Default for BroydenType {
    fn default() -> Self {
        BroydenType::TypeII
    }
}

/// Regularization added to the diagonal of the normal-equations matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regularizer {
    /// No regularization.
    None,
    /// M[i,i] += lambda.
    Tikhonov,
    /// M[i,i] += lambda * (||X_l||_F^2 + ||F_l||_F^2).
    Frobenius,
}

impl Default for Regularizer {
    fn default() -> Self {
        Regularizer::None
    }
}

/// History memory policy applied when the column buffer wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memory {
    /// Oldest column is overwritten; history keeps rolling.
    Rolling,
    /// Entire history is dropped and rebuilt from the next delta.
    Restarted,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::Rolling
    }
}

/// Policy controlling when the accelerator becomes live.
///
/// `start_iter` and `epsilon` preconditions (`start_iter >= 2`,
/// `epsilon >= 0`) are enforced at `AndersonAccelerator::new`, not here —
/// this type carries configuration only, no behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    /// Active as soon as `iter >= 2`.
    Immediate,
    /// Active once `iter >= start_iter`.
    ByIteration { start_iter: usize },
    /// Active once both primal and dual residuals fall under an
    /// epsilon-scaled tolerance.
    ByAccuracy { epsilon: f64 },
    /// Union of `ByIteration` and `ByAccuracy`.
    ByIterationOrAccuracy { epsilon: f64, start_iter: usize },
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Immediate
    }
}
