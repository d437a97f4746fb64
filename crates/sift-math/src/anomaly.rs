//! Anomaly and sample-covariance computation on ensemble matrices.
//!
//! An ensemble matrix stores one member state per column; the anomaly
//! matrix is the ensemble with its per-row (per-component) mean removed.

use nalgebra::DMatrix;

/// Subtract the row-wise mean from every column of `m`.
///
/// The result has a zero row-wise mean by construction.
pub fn mean_anomaly(m: &DMatrix<f64>) -> DMatrix<f64> {
    let mean = m.column_mean();
    let mut out = m.clone();
    for mut col in out.column_iter_mut() {
        col -= &mean;
    }
    out
}

/// Unbiased sample covariance `(1/(N-1)) · A · Aᵀ` of the columns of `m`.
///
/// `N` is the column count. Requires `N > 1`; the estimator is
/// undefined for a single column and callers guarantee the bound.
pub fn sample_covariance(m: &DMatrix<f64>) -> DMatrix<f64> {
    let a = mean_anomaly(m);
    let scale = 1.0 / (m.ncols() as f64 - 1.0);
    scale * &a * a.transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anomaly_of_known_matrix() {
        // Rows have means 2 and 5.
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a = mean_anomaly(&m);
        let expected = DMatrix::from_row_slice(2, 3, &[-1.0, 0.0, 1.0, -1.0, 0.0, 1.0]);
        assert_eq!(a, expected);
    }

    #[test]
    fn covariance_of_perfectly_correlated_columns() {
        // Second row is twice the first, so cov = [[v, 2v], [2v, 4v]].
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        let v = sample_covariance(&m);
        assert!((v[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((v[(0, 1)] - 2.0).abs() < 1e-12);
        assert!((v[(1, 0)] - 2.0).abs() < 1e-12);
        assert!((v[(1, 1)] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn covariance_is_symmetric() {
        let m = DMatrix::from_row_slice(3, 4, &[0.3, -1.2, 4.0, 2.2, 9.1, 0.0, -3.3, 1.0, 5.5, 2.0, 2.0, -7.0]);
        let v = sample_covariance(&m);
        for i in 0..3 {
            for j in 0..3 {
                assert!((v[(i, j)] - v[(j, i)]).abs() < 1e-12);
            }
        }
    }

    proptest! {
        #[test]
        fn anomaly_rows_have_zero_mean(
            rows in 1usize..6,
            cols in 2usize..8,
            seed_vals in proptest::collection::vec(-1.0e3f64..1.0e3, 48),
        ) {
            let m = DMatrix::from_fn(rows, cols, |r, c| seed_vals[(r * cols + c) % seed_vals.len()] + r as f64);
            let a = mean_anomaly(&m);
            for r in 0..rows {
                let row_mean: f64 = a.row(r).iter().sum::<f64>() / cols as f64;
                prop_assert!(row_mean.abs() < 1e-9);
            }
        }
    }
}
