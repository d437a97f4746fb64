//! The two Kalman-gain formulations.
//!
//! `kalman_gain` is the direct form, dominated by inverting an `l × l`
//! innovation matrix. `kalman_gain_tall` routes the same algebra
//! through the `N`-column anomaly factor instead, which is cheaper
//! whenever the ensemble is smaller than both the state and the
//! observation (`N < k` and `N < l`). The two agree to floating-point
//! tolerance on any input; which one runs is purely a cost decision.

use nalgebra::DMatrix;

use crate::anomaly::{mean_anomaly, sample_covariance};
use crate::error::MathError;

/// Moore–Penrose pseudo-inverse via SVD with a rank-revealing cutoff.
///
/// Singular values at or below `ε · max(rows, cols) · σ_max` are treated
/// as zero, so singular innovation matrices (zero `R`, rank-deficient
/// ensembles) yield a finite gain instead of failing. Ill-conditioning
/// inside the cutoff is absorbed silently; that mirrors the behavior the
/// filter has always had and is a deliberate usability tradeoff.
///
/// # Errors
///
/// [`MathError::Decomposition`] if the SVD does not return its factors.
pub fn pseudo_inverse(m: &DMatrix<f64>) -> Result<DMatrix<f64>, MathError> {
    let svd = m.clone().svd(true, true);
    let u = svd
        .u
        .as_ref()
        .ok_or(MathError::Decomposition { what: "SVD U factor" })?;
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or(MathError::Decomposition { what: "SVD V factor" })?;

    let largest = svd.singular_values.max();
    let cutoff = f64::EPSILON * m.nrows().max(m.ncols()) as f64 * largest;
    let inv_sigma = DMatrix::from_diagonal(
        &svd.singular_values
            .map(|s| if s > cutoff { 1.0 / s } else { 0.0 }),
    );

    Ok(v_t.transpose() * inv_sigma * u.transpose())
}

/// Direct Kalman gain `K = V·Hᵀ·(H·V·Hᵀ + R)⁺` with `V` the sample
/// covariance of the ensemble columns of `x`.
///
/// Shapes: `x` is `k × N`, `h` is `l × k`, `r` is `l × l`; the gain is
/// `k × l`. `h` may be rectangular and `r` singular or zero. Cost is
/// dominated by the `l × l` pseudo-inverse plus forming `V`
/// (`O(l³) + O(k·l·N)`).
///
/// # Errors
///
/// Propagates [`MathError::Decomposition`] from the pseudo-inverse.
pub fn kalman_gain(
    x: &DMatrix<f64>,
    h: &DMatrix<f64>,
    r: &DMatrix<f64>,
) -> Result<DMatrix<f64>, MathError> {
    let v = sample_covariance(x);
    let vht = &v * h.transpose();
    let innovation = h * &vht + r;
    Ok(vht * pseudo_inverse(&innovation)?)
}

/// Ensemble-factored Kalman gain, algebraically identical to
/// [`kalman_gain`].
///
/// Uses `Z = mean_anomaly(x)/√(N-1)` so that `V = Z·Zᵀ` never has to be
/// formed: `K = Z·Sᵀ·(S·Sᵀ + R)⁺` with `S = H·Z`. Cost is
/// `O(k·N² + l·N²)`, preferred when `N < k` and `N < l`.
///
/// # Errors
///
/// Propagates [`MathError::Decomposition`] from the pseudo-inverse.
pub fn kalman_gain_tall(
    x: &DMatrix<f64>,
    h: &DMatrix<f64>,
    r: &DMatrix<f64>,
) -> Result<DMatrix<f64>, MathError> {
    let scale = 1.0 / (x.ncols() as f64 - 1.0).sqrt();
    let z = scale * mean_anomaly(x);
    let s = h * &z;
    let innovation = &s * s.transpose() + r;
    Ok(z * s.transpose() * pseudo_inverse(&innovation)?)
}
