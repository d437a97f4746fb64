//! Initial-ensemble generation.

use nalgebra::DVector;
use tracing::debug;

use sift_core::{Ensemble, State, ValidationError};
use sift_math::{init_stream, NoiseModel};

use crate::error::EngineError;

/// Parameters for drawing one initial ensemble.
#[derive(Clone, Debug)]
pub struct InitParams {
    /// Experiment name stamped on every member.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Ensemble size `N`.
    pub members: usize,
    /// State dimension `k`.
    pub state_dim: usize,
    /// Initial mean `x0`, length `k`.
    pub mean: Vec<f64>,
    /// Per-component initial variances `V0`, length `k`.
    pub variance: Vec<f64>,
}

fn validate(params: &InitParams) -> Result<(), EngineError> {
    if params.name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if params.members == 0 {
        return Err(ValidationError::ZeroDimension { field: "N" }.into());
    }
    if params.state_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "k" }.into());
    }
    if params.mean.len() != params.state_dim {
        return Err(ValidationError::ParameterSize {
            field: "x0",
            expected: params.state_dim,
            found: params.mean.len(),
        }
        .into());
    }
    if params.variance.len() != params.state_dim {
        return Err(ValidationError::ParameterSize {
            field: "V0",
            expected: params.state_dim,
            found: params.variance.len(),
        }
        .into());
    }
    Ok(())
}

/// Draw an initial ensemble of `N` members around `x0` with diagonal
/// covariance `V0`.
///
/// Member `i` gets id `i` and `sys_tim == obs_tim == 0`. The whole
/// ensemble comes from one stream derived from the base seed, so the
/// same parameters always reproduce the same ensemble.
///
/// # Errors
///
/// [`EngineError::Validation`] for bad parameters.
pub fn draw(params: &InitParams) -> Result<Ensemble, EngineError> {
    validate(params)?;

    let spread = NoiseModel::Diagonal(DVector::from_column_slice(&params.variance));
    let mut rng = init_stream(params.seed);
    let w = spread.sample(params.state_dim, params.members, &mut rng);

    debug!(members = params.members, state_dim = params.state_dim, "drawing initial ensemble");
    let members = (0..params.members)
        .map(|i| State {
            name: params.name.clone(),
            id: i as i64,
            sys_tim: 0,
            obs_tim: 0,
            x: w
                .column(i)
                .iter()
                .zip(&params.mean)
                .map(|(noise, mean)| mean + noise)
                .collect(),
        })
        .collect();

    Ok(Ensemble::from_members(members)?)
}
