//! The observation operator `H`, mapping state space to observation space.

use nalgebra::DMatrix;

use crate::error::MathError;

/// The observation operator as configured, parsed once.
///
/// Absent in the parameter file means the (possibly rectangular)
/// identity: each of the first `l` state components is observed
/// directly.
#[derive(Clone, Debug, PartialEq)]
pub enum ObservationOperator {
    /// Default: the `l × k` identity.
    Identity,
    /// An explicit `l × k` matrix.
    Matrix(DMatrix<f64>),
}

impl ObservationOperator {
    /// Dispatch a raw parameter vector on its length.
    ///
    /// Empty ⇒ [`ObservationOperator::Identity`]; length `rows · cols`
    /// ⇒ an explicit matrix in row-major order.
    ///
    /// # Errors
    ///
    /// Any other length is a [`MathError::OperatorShape`].
    pub fn parse(raw: &[f64], rows: usize, cols: usize) -> Result<Self, MathError> {
        if raw.is_empty() {
            Ok(Self::Identity)
        } else if raw.len() == rows * cols {
            Ok(Self::Matrix(DMatrix::from_row_slice(rows, cols, raw)))
        } else {
            Err(MathError::OperatorShape {
                found: raw.len(),
                rows,
                cols,
            })
        }
    }

    /// Materialize the full `rows × cols` matrix.
    pub fn materialize(&self, rows: usize, cols: usize) -> DMatrix<f64> {
        match self {
            Self::Identity => DMatrix::identity(rows, cols),
            Self::Matrix(m) => m.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn empty_is_identity() {
        let h = ObservationOperator::parse(&[], 2, 3).unwrap();
        assert_eq!(h, ObservationOperator::Identity);
        let m = h.materialize(2, 3);
        assert_eq!(m, DMatrix::identity(2, 3));
    }

    #[test]
    fn explicit_matrix_is_row_major() {
        let h = ObservationOperator::parse(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0], 2, 3).unwrap();
        let m = h.materialize(2, 3);
        // Selects components 0 and 2.
        let x = DVector::from_vec(vec![10.0, 20.0, 30.0]);
        let y = &m * &x;
        assert_eq!(y, DVector::from_vec(vec![10.0, 30.0]));
    }

    #[test]
    fn wrong_length_rejected() {
        let err = ObservationOperator::parse(&[1.0; 5], 2, 3).unwrap_err();
        assert_eq!(
            err,
            MathError::OperatorShape {
                found: 5,
                rows: 2,
                cols: 3
            }
        );
    }
}
