/// ==============================================================================================
/// ===================================== Extrapolator ============================================
/// ==============================================================================================
///
/// Assembles the small variant-specific linear system, solves it with
/// regularization, validates the result, and applies the correction to
/// the candidate g in place. Every failure path degrades silently: g is
/// left untouched and a diagnostic tag is appended.
use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView2};
use ndarray_linalg::Solve;

use crate::activation::ActivationGate;
use crate::diagnostics::{AccelerationTag, Diagnostics};
use crate::error::AccelerationError;
use crate::history::History;
use crate::variant::{Activation, BroydenType, Memory, Regularizer};

/// Coefficient-magnitude safeguard cap on ||eta||_2. Independent of the
/// residual-norm safeguard in `record_safeguard_decision`.
const ETA_NORM_CAP: f64 = 1e4;

/// Uniform dispatch contract shared by `AndersonAccelerator` and the
/// no-op `EmptyAccelerator`, so an outer solver never branches on
/// whether acceleration is enabled.
pub trait FixedPointAccelerator {
    fn check_activation(&mut self, iter: usize);
    fn check_activation_residual(&mut self, r_prim: f64, r_dual: f64, max_norm_prim: f64, max_norm_dual: f64);
    fn update_history(&mut self, g: &Array1<f64>, x: &Array1<f64>, iter: usize);
    fn accelerate(&mut self, g: &mut Array1<f64>, x: &Array1<f64>, iter: usize);
    fn empty_history(&mut self);
    fn empty_caches(&mut self);
    fn was_successful(&self) -> bool;
    fn is_active(&self) -> bool;
    fn is_safeguarding(&self) -> bool;
    fn get_mem(&self) -> usize;
}

/// Entrywise (Frobenius, for matrices) squared L2 norm.
#[inline]
fn sum_of_squares(a: &ArrayView2<f64>) -> f64 {
    a.iter().map(|v| v * v).sum()
}

#[inline]
fn norm_l2(a: &Array1<f64>) -> f64 {
    a.iter().map(|v| v * v).sum::<f64>().sqrt()
}

#[derive(Debug)]
pub struct AndersonAccelerator {
    dim: usize,
    mem: usize,
    lambda: f64,
    tau: f64,
    broyden: BroydenType,
    regularizer: Regularizer,
    memory: Memory,
    safeguarded: bool,
    success: bool,
    accepted: usize,
    declined: usize,
    activation: ActivationGate,
    history: History,
    diagnostics: Diagnostics,
}

impl AndersonAccelerator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dim: usize,
        mem: usize,
        lambda: f64,
        tau: f64,
        broyden: BroydenType,
        regularizer: Regularizer,
        memory: Memory,
        activation: Activation,
        safeguarded: bool,
        activate_logging: bool,
    ) -> Result<Self, AccelerationError> {
        if dim == 0 {
            return Err(AccelerationError::InvalidDim { requested: dim });
        }
        if mem <= 2 {
            return Err(AccelerationError::InvalidMem { requested: mem });
        }
        match activation {
            Activation::ByIteration { start_iter } if start_iter < 2 => {
                return Err(AccelerationError::InvalidStartIter { start_iter });
            }
            Activation::ByAccuracy { epsilon } if epsilon < 0.0 => {
                return Err(AccelerationError::InvalidEpsilon { epsilon });
            }
            Activation::ByIterationOrAccuracy { epsilon, start_iter } => {
                if start_iter < 2 {
                    return Err(AccelerationError::InvalidStartIter { start_iter });
                }
                if epsilon < 0.0 {
                    return Err(AccelerationError::InvalidEpsilon { epsilon });
                }
            }
            _ => {}
        }

        let mem = mem.min(dim);

        Ok(Self {
            dim,
            mem,
            lambda,
            tau,
            broyden,
            regularizer,
            memory,
            safeguarded,
            success: false,
            accepted: 0,
            declined: 0,
            activation: ActivationGate::new(activation),
            history: History::new(dim, mem),
            diagnostics: Diagnostics::new(activate_logging),
        })
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted
    }

    pub fn declined_count(&self) -> usize {
        self.declined
    }

    /// Compare a post-acceleration residual norm against the reference
    /// norm the outer solver would have produced without acceleration,
    /// accepting only when `new_norm <= tau * ref_norm`. The reference
    /// norm's source (the outer solver's own residual workspace) is
    /// opaque to the core.
    pub fn record_safeguard_decision(&mut self, iter: usize, new_norm: f64, ref_norm: f64) {
        let accepted = new_norm <= self.tau * ref_norm;
        if accepted {
            self.accepted += 1;
        } else {
            self.declined += 1;
        }
        self.diagnostics.log_safeguard(iter, new_norm, ref_norm, self.tau, accepted);
    }

    /// Affine-combination weights implied by the last solved eta (spec §4.7).
    pub fn recover_alpha(&self) -> Array1<f64> {
        crate::alpha::recover(self.history.eta_valid())
    }
}

impl FixedPointAccelerator for AndersonAccelerator {
    fn check_activation(&mut self, iter: usize) {
        self.activation.check_iteration(iter);
    }

    fn check_activation_residual(&mut self, r_prim: f64, r_dual: f64, max_norm_prim: f64, max_norm_dual: f64) {
        self.activation.check_residual(r_prim, r_dual, max_norm_prim, max_norm_dual);
    }

    fn update_history(&mut self, g: &Array1<f64>, x: &Array1<f64>, iter: usize) {
        let start = self.diagnostics.is_enabled().then(std::time::Instant::now);
        self.history.update(g, x, self.memory, iter, &mut self.diagnostics);
        if let Some(start) = start {
            self.diagnostics.log_update_duration(start.elapsed());
        }
    }

    fn accelerate(&mut self, g: &mut Array1<f64>, x: &Array1<f64>, iter: usize) {
        let start = self.diagnostics.is_enabled().then(std::time::Instant::now);
        self.accelerate_inner(g, x, iter);
        if let Some(start) = start {
            self.diagnostics.log_accelerate_duration(start.elapsed());
        }
    }

    fn empty_history(&mut self) {
        self.history.empty_history();
        self.activation.reset();
        self.success = false;
    }

    fn empty_caches(&mut self) {
        self.history.empty_caches();
    }

    fn was_successful(&self) -> bool {
        self.success
    }

    fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    fn is_safeguarding(&self) -> bool {
        self.safeguarded
    }

    fn get_mem(&self) -> usize {
        self.mem
    }
}

impl AndersonAccelerator {
    /// The actual extrapolation step, timed as a whole by `accelerate`
    /// above regardless of which early-return path it takes.
    fn accelerate_inner(&mut self, g: &mut Array1<f64>, x: &Array1<f64>, iter: usize) {
        debug_assert_eq!(g.len(), self.dim);
        debug_assert_eq!(x.len(), self.dim);
        let _ = x; // f was already captured by the preceding update_history call

        self.success = false;

        let l = self.history.valid_cols();
        if l < 3 {
            self.diagnostics.log_acceleration(iter, AccelerationTag::NotEnoughCols);
            return;
        }

        let x_l = self.history.x_cols(l);
        let g_l = self.history.g_cols(l);
        let f_l = self.history.f_cols(l);
        let f = self.history.residual();

        let mut m = Array2::<f64>::zeros((l, l));
        let mut rhs = Array1::<f64>::zeros(l);

        match self.broyden {
            BroydenType::TypeI => {
                m.assign(&x_l.t().dot(&f_l));
                rhs.assign(&x_l.t().dot(f));
            }
            BroydenType::TypeII => {
                m.assign(&f_l.t().dot(&f_l));
                rhs.assign(&f_l.t().dot(f));
            }
        }

        match self.regularizer {
            Regularizer::None => {}
            Regularizer::Tikhonov => {
                for i in 0..l {
                    m[[i, i]] += self.lambda;
                }
            }
            Regularizer::Frobenius => {
                let beta = self.lambda * (sum_of_squares(&x_l) + sum_of_squares(&f_l));
                for i in 0..l {
                    m[[i, i]] += beta;
                }
                self.diagnostics.log_regularization(beta);
            }
        }

        let eta = match m.solve_into(rhs) {
            Ok(eta) => eta,
            Err(_) => {
                self.diagnostics.log_acceleration(iter, AccelerationTag::FailSingular);
                return;
            }
        };

        if norm_l2(&eta) > ETA_NORM_CAP {
            self.diagnostics.log_acceleration(iter, AccelerationTag::FailEtaNorm);
            return;
        }

        // g <- g - G_l . eta  (gemv, alpha = -1, beta = 1)
        general_mat_vec_mul(-1.0, &g_l, &eta, 1.0, g);

        self.history.eta_mut(l).assign(&eta);
        self.success = true;
    }
}

/// No-op variant satisfying the same contract as `AndersonAccelerator`,
/// enabling uniform dispatch when acceleration is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyAccelerator {
    mem: usize,
}

impl EmptyAccelerator {
    pub fn new(mem: usize) -> Self {
        Self { mem }
    }
}

impl FixedPointAccelerator for EmptyAccelerator {
    fn check_activation(&mut self, _iter: usize) {}
    fn check_activation_residual(&mut self, _r_prim: f64, _r_dual: f64, _max_norm_prim: f64, _max_norm_dual: f64) {}
    fn update_history(&mut self, _g: &Array1<f64>, _x: &Array1<f64>, _iter: usize) {}
    fn accelerate(&mut self, _g: &mut Array1<f64>, _x: &Array1<f64>, _iter: usize) {}
    fn empty_history(&mut self) {}
    fn empty_caches(&mut self) {}
    fn was_successful(&self) -> bool {
        false
    }
    fn is_active(&self) -> bool {
        false
    }
    fn is_safeguarding(&self) -> bool {
        false
    }
    fn get_mem(&self) -> usize {
        self.mem
    }
}
