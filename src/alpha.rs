/// ==============================================================================================
/// ================================== Alpha Recovery =============================================
/// ==============================================================================================
///
/// Recover the affine-combination weights an extrapolation step implies.
/// Diagnostic/analysis use only; not called from `accelerate`'s hot path.
use ndarray::{Array1, ArrayView1};

/// Given `eta` of length n, return alpha of length n+1:
///     alpha[0]   = eta[0]
///     alpha[i]   = eta[i] - eta[i-1]   for i in 1..n
///     alpha[n]   = 1 - eta[n-1]
/// Sums to exactly 1 (up to floating-point) by telescoping.
pub fn recover(eta: ArrayView1<f64>) -> Array1<f64> {
    let n = eta.len();
    let mut alpha = Array1::<f64>::zeros(n + 1);

    if n == 0 {
        alpha[0] = 1.0;
        return alpha;
    }

    alpha[0] = eta[0];
    for i in 1..n {
        alpha[i] = eta[i] - eta[i - 1];
    }
    alpha[n] = 1.0 - eta[n - 1];
    alpha
}
