//! Error types for the linear-algebra kernel.

use std::error::Error;
use std::fmt;

/// Errors from parsing size-dispatched parameters or from a
/// decomposition that could not produce its factors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathError {
    /// A noise covariance vector has a length that is neither the
    /// dimension (diagonal) nor its square (full matrix).
    NoiseShape {
        /// Which covariance (`Q` or `R`).
        what: &'static str,
        /// Length actually supplied.
        found: usize,
        /// The dimension the vector is dispatched against.
        dim: usize,
    },
    /// An observation-operator vector is not `rows * cols` long.
    OperatorShape {
        /// Length actually supplied.
        found: usize,
        /// Observation dimension `l`.
        rows: usize,
        /// State dimension `k`.
        cols: usize,
    },
    /// A matrix decomposition did not yield the requested factors.
    Decomposition {
        /// Which factor was missing.
        what: &'static str,
    },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoiseShape { what, found, dim } => {
                write!(
                    f,
                    "invalid size of {what} given {found} != {dim} or {}",
                    dim * dim
                )
            }
            Self::OperatorShape { found, rows, cols } => {
                write!(f, "invalid size of H given {found} != {}", rows * cols)
            }
            Self::Decomposition { what } => write!(f, "{what} unavailable"),
        }
    }
}

impl Error for MathError {}
