/// ==============================================================================================
/// =================================== Activation Gate ===========================================
/// ==============================================================================================
///
/// Decides when the accelerator becomes live. Latching: once active, a
/// gate never deactivates except via an external `reset()` (driven by
/// `AndersonAccelerator::empty_history`). Calls made with the signature
/// that doesn't match the configured policy are no-ops.
use crate::variant::Activation;

#[derive(Clone, Copy, Debug, Default)]
pub struct ActivationGate {
    policy: Activation,
    activated: bool,
}

impl ActivationGate {
    pub fn new(policy: Activation) -> Self {
        Self {
            policy,
            activated: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.activated
    }

    /// Clear latching. Called only from `empty_history`.
    pub fn reset(&mut self) {
        self.activated = false;
    }

    pub fn check_iteration(&mut self, iter: usize) {
        if self.activated {
            return;
        }
        let fires = match self.policy {
            Activation::Immediate => iter >= 2,
            Activation::ByIteration { start_iter } => iter >= start_iter,
            Activation::ByIterationOrAccuracy { start_iter, .. } => iter >= start_iter,
            Activation::ByAccuracy { .. } => false,
        };
        if fires {
            self.activated = true;
        }
    }

    pub fn check_residual(&mut self, r_prim: f64, r_dual: f64, max_norm_prim: f64, max_norm_dual: f64) {
        if self.activated {
            return;
        }
        let fires = match self.policy {
            Activation::ByAccuracy { epsilon } | Activation::ByIterationOrAccuracy { epsilon, .. } => {
                r_prim < epsilon + epsilon * max_norm_prim && r_dual < epsilon + epsilon * max_norm_dual
            }
            Activation::Immediate | Activation::ByIteration { .. } => false,
        };
        if fires {
            self.activated = true;
        }
    }
}
