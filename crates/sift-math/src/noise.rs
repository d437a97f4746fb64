//! Size-dispatched noise covariances and Gaussian ensemble sampling.

use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::MathError;

/// A noise covariance as configured, parsed once from its flat vector.
///
/// Parameter files carry covariances as optional flat vectors: absent
/// means no noise, a length-`dim` vector is a diagonal, a length-`dim²`
/// vector is a full row-major matrix. The variant is decided here, at
/// parse time, and every use site dispatches on the tag.
#[derive(Clone, Debug, PartialEq)]
pub enum NoiseModel {
    /// No noise configured; samples are zero, the covariance is zero.
    Absent,
    /// Per-component variances on the diagonal.
    Diagonal(DVector<f64>),
    /// Full symmetric positive-semidefinite covariance.
    Full(DMatrix<f64>),
}

/// One standard-normal draw via the Box–Muller transform.
pub(crate) fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn standard_normal_matrix(rows: usize, cols: usize, rng: &mut ChaCha8Rng) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| standard_normal(rng))
}

/// A factor L with `L·Lᵀ = m`, tolerating positive-semidefinite input.
///
/// Cholesky requires strict positive definiteness; rank-deficient
/// covariances (a zero R, a selector H, a collapsed ensemble) fall back
/// to the symmetric-eigendecomposition square root with eigenvalues
/// floored at zero.
fn covariance_factor(m: &DMatrix<f64>) -> DMatrix<f64> {
    match Cholesky::new(m.clone()) {
        Some(chol) => chol.l(),
        None => {
            let eigen = SymmetricEigen::new(m.clone());
            let sqrt = eigen.eigenvalues.map(|v| v.max(0.0).sqrt());
            &eigen.eigenvectors * DMatrix::from_diagonal(&sqrt)
        }
    }
}

impl NoiseModel {
    /// Dispatch a raw parameter vector on its length.
    ///
    /// Empty ⇒ [`NoiseModel::Absent`]; length `dim` ⇒ diagonal; length
    /// `dim²` ⇒ full matrix in row-major order.
    ///
    /// # Errors
    ///
    /// Any other length is a [`MathError::NoiseShape`]; `what` names the
    /// parameter (`"Q"` or `"R"`) in the report.
    pub fn parse(what: &'static str, raw: &[f64], dim: usize) -> Result<Self, MathError> {
        if raw.is_empty() {
            Ok(Self::Absent)
        } else if raw.len() == dim {
            Ok(Self::Diagonal(DVector::from_column_slice(raw)))
        } else if raw.len() == dim * dim {
            Ok(Self::Full(DMatrix::from_row_slice(dim, dim, raw)))
        } else {
            Err(MathError::NoiseShape {
                what,
                found: raw.len(),
                dim,
            })
        }
    }

    /// Materialize the full `dim × dim` covariance matrix.
    pub fn covariance(&self, dim: usize) -> DMatrix<f64> {
        match self {
            Self::Absent => DMatrix::zeros(dim, dim),
            Self::Diagonal(v) => DMatrix::from_diagonal(v),
            Self::Full(m) => m.clone(),
        }
    }

    /// Draw `n` columns of `dim`-dimensional noise with this covariance.
    ///
    /// Diagonal covariances scale i.i.d. standard normals by the
    /// elementwise square root; full covariances multiply by a factor L
    /// with `L·Lᵀ = Σ`. A full matrix that happens to be diagonal draws
    /// the same distribution as the diagonal form. Output is fully
    /// determined by the generator state and call order.
    pub fn sample(&self, dim: usize, n: usize, rng: &mut ChaCha8Rng) -> DMatrix<f64> {
        match self {
            Self::Absent => DMatrix::zeros(dim, n),
            Self::Diagonal(v) => {
                let z = standard_normal_matrix(v.len(), n, rng);
                let scale = v.map(|s| s.sqrt());
                let mut out = z;
                for mut col in out.column_iter_mut() {
                    col.component_mul_assign(&scale);
                }
                out
            }
            Self::Full(m) => {
                let z = standard_normal_matrix(m.nrows(), n, rng);
                covariance_factor(m) * z
            }
        }
    }

    /// True when no noise was configured.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
