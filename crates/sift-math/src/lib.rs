//! Ensemble linear algebra for the Sift data-assimilation toolkit.
//!
//! Everything numerically interesting lives here: anomaly and sample
//! covariance computation, covariance-shaped Gaussian sampling, the two
//! algebraically-equivalent Kalman-gain formulations, and deterministic
//! random-stream derivation.
//!
//! Noise covariances arrive from parameter files as flat vectors whose
//! length selects their meaning. They are parsed exactly once, at the
//! configuration boundary, into the [`NoiseModel`] tagged variant —
//! no use site re-sniffs lengths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod anomaly;
mod error;
mod gain;
mod noise;
mod operator;
mod stream;

pub use anomaly::{mean_anomaly, sample_covariance};
pub use error::MathError;
pub use gain::{kalman_gain, kalman_gain_tall, pseudo_inverse};
pub use noise::NoiseModel;
pub use operator::ObservationOperator;
pub use stream::{analysis_stream, init_stream, prediction_stream};
