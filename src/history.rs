/// ==============================================================================================
/// =================================== History Buffers ===========================================
/// ==============================================================================================
///
/// Dense d×m column matrices of Δx, Δg, Δf, plus the previous-iterate
/// triple and the current residual. Allocated once at construction with
/// fixed capacity; `empty_history` zeros contents in place, `empty_caches`
/// resets only the push counter, leaving the buffers as stale data — safe
/// because every read site is bounded by `valid_cols()`.
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};

use crate::diagnostics::{Diagnostics, RestartReason};
use crate::variant::Memory;

#[derive(Debug)]
pub struct History {
    dim: usize,
    mem: usize,
    iter: usize,
    init_phase: bool,
    x: Array2<f64>,
    g: Array2<f64>,
    f_hist: Array2<f64>,
    eta: Array1<f64>,
    x_prev: Array1<f64>,
    g_prev: Array1<f64>,
    f_prev: Array1<f64>,
    f: Array1<f64>,
}

impl History {
    pub fn new(dim: usize, mem: usize) -> Self {
        Self {
            dim,
            mem,
            iter: 0,
            init_phase: true,
            x: Array2::zeros((dim, mem)),
            g: Array2::zeros((dim, mem)),
            f_hist: Array2::zeros((dim, mem)),
            eta: Array1::zeros(mem),
            x_prev: Array1::zeros(dim),
            g_prev: Array1::zeros(dim),
            f_prev: Array1::zeros(dim),
            f: Array1::zeros(dim),
        }
    }

    #[inline]
    pub fn iter(&self) -> usize {
        self.iter
    }

    #[inline]
    pub fn is_init_phase(&self) -> bool {
        self.init_phase
    }

    /// Number of valid columns l = min(iter, mem).
    #[inline]
    pub fn valid_cols(&self) -> usize {
        self.iter.min(self.mem)
    }

    #[inline]
    pub fn residual(&self) -> &Array1<f64> {
        &self.f
    }

    pub fn x_cols(&self, l: usize) -> ArrayView2<f64> {
        self.x.slice(s![.., ..l])
    }

    pub fn g_cols(&self, l: usize) -> ArrayView2<f64> {
        self.g.slice(s![.., ..l])
    }

    pub fn f_cols(&self, l: usize) -> ArrayView2<f64> {
        self.f_hist.slice(s![.., ..l])
    }

    pub fn eta_valid(&self) -> ArrayView1<f64> {
        self.eta.slice(s![..self.valid_cols()])
    }

    pub fn eta_mut(&mut self, l: usize) -> ArrayViewMut1<f64> {
        self.eta.slice_mut(s![..l])
    }

    /// Steps 1-7 of the history updater:
    ///     1. f <- x - g
    ///     2. init_phase capture and early return
    ///     3. select write column j = iter mod mem
    ///     4. apply memory policy on wrap
    ///     5. write Δx, Δg, Δf into column j
    ///     6. capture x, g, f as the new previous triple
    ///     7. iter += 1
    ///
    /// `outer_iter` is the caller's own loop counter, used only to label
    /// diagnostics records — the write-column/wrap arithmetic is driven
    /// entirely by the internal push counter `self.iter`.
    pub fn update(
        &mut self,
        g: &Array1<f64>,
        x: &Array1<f64>,
        memory: Memory,
        outer_iter: usize,
        diagnostics: &mut Diagnostics,
    ) {
        debug_assert_eq!(g.len(), self.dim, "g length must match accelerator dim");
        debug_assert_eq!(x.len(), self.dim, "x length must match accelerator dim");

        self.f.assign(x);
        self.f -= g;

        if self.init_phase {
            self.x_prev.assign(x);
            self.g_prev.assign(g);
            self.f_prev.assign(&self.f);
            self.init_phase = false;
            return;
        }

        let mut j0 = self.iter % self.mem;
        if j0 == 0 && self.iter != 0 {
            match memory {
                Memory::Rolling => {}
                Memory::Restarted => {
                    diagnostics.log_restart(outer_iter, RestartReason::MemoryFull);
                    self.empty_caches();
                    j0 = self.iter % self.mem;
                }
            }
        }

        for i in 0..self.dim {
            self.x[[i, j0]] = x[i] - self.x_prev[i];
            self.g[[i, j0]] = g[i] - self.g_prev[i];
            self.f_hist[[i, j0]] = self.f[i] - self.f_prev[i];
        }

        self.x_prev.assign(x);
        self.g_prev.assign(g);
        self.f_prev.assign(&self.f);
        self.iter += 1;
    }

    /// Full wipe: zero every buffer, iter <- 0, init_phase <- true.
    pub fn empty_history(&mut self) {
        self.x.fill(0.0);
        self.g.fill(0.0);
        self.f_hist.fill(0.0);
        self.eta.fill(0.0);
        self.x_prev.fill(0.0);
        self.g_prev.fill(0.0);
        self.f_prev.fill(0.0);
        self.f.fill(0.0);
        self.iter = 0;
        self.init_phase = true;
    }

    /// iter <- 0 only; buffer contents are left stale (only read for j < valid_cols()).
    pub fn empty_caches(&mut self) {
        self.iter = 0;
    }
}
