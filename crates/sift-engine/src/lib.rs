//! Assimilation filters and sequential drivers for the Sift toolkit.
//!
//! One module per operation: [`init`] draws the starting ensemble,
//! [`predict`] advances a single member through the system model,
//! [`obsgen`] synthesizes twin-experiment observations, and [`enkf`]
//! applies the ensemble Kalman analysis. [`analyse`] dispatches on the
//! filter name the way the command line selects it.
//!
//! Every operation validates completely before touching numbers and is
//! all-or-nothing on error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod enkf;
mod error;
pub mod init;
pub mod obsgen;
pub mod particle;
pub mod predict;

pub use error::EngineError;
pub use init::InitParams;
pub use obsgen::ObsgenParams;
pub use predict::PredictParams;

use sift_core::{Ensemble, Observation};
use sift_math::{NoiseModel, ObservationOperator};

/// Parameters shared by every analysis filter.
#[derive(Clone, Debug)]
pub struct AnalysisParams {
    /// Experiment name the ensemble and observation must carry.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Ensemble size `N`.
    pub members: usize,
    /// State dimension `k`.
    pub state_dim: usize,
    /// Observation dimension `l`.
    pub obs_dim: usize,
    /// Observation-noise covariance `R`; absent means zero.
    pub obs_noise: NoiseModel,
    /// Observation operator `H`.
    pub operator: ObservationOperator,
}

/// Apply the named filter's analysis step to the ensemble in place.
///
/// # Errors
///
/// [`EngineError::UnknownFilter`] for a name that is not a filter at
/// all; otherwise whatever the selected filter returns.
pub fn analyse(
    filter: &str,
    params: &AnalysisParams,
    ensemble: &mut Ensemble,
    obs: &Observation,
) -> Result<(), EngineError> {
    match filter {
        "enkf" => enkf::analyse(params, ensemble, obs),
        "particle" => particle::analyse(params, ensemble, obs),
        other => Err(EngineError::UnknownFilter {
            name: other.to_owned(),
        }),
    }
}
