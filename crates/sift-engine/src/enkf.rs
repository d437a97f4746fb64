//! The ensemble Kalman filter analysis step.
//!
//! Perturbed-observation EnKF: each member is corrected toward its own
//! stochastically perturbed copy of the observation, with the
//! perturbations re-centred so their ensemble mean is exactly zero and
//! the analysis mean stays unbiased.

use nalgebra::{DMatrix, DVector, RowDVector};
use tracing::debug;

use sift_core::{Ensemble, Observation, ValidationError};
use sift_math::{analysis_stream, kalman_gain, kalman_gain_tall, mean_anomaly};

use crate::error::EngineError;
use crate::AnalysisParams;

fn validate(
    params: &AnalysisParams,
    ensemble: &Ensemble,
    obs: &Observation,
) -> Result<(), EngineError> {
    obs.validate()?;

    if params.members == 0 {
        return Err(ValidationError::ZeroDimension { field: "N" }.into());
    }
    if params.state_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "k" }.into());
    }
    if params.obs_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "l" }.into());
    }

    if ensemble.len() != params.members {
        return Err(ValidationError::ParameterSize {
            field: "N",
            expected: params.members,
            found: ensemble.len(),
        }
        .into());
    }
    if ensemble.state_dim() != params.state_dim {
        return Err(ValidationError::StateSizeMismatch {
            expected: params.state_dim,
            found: ensemble.state_dim(),
        }
        .into());
    }
    if obs.y.len() != params.obs_dim {
        return Err(ValidationError::ObservationSizeMismatch {
            expected: params.obs_dim,
            found: obs.y.len(),
        }
        .into());
    }

    if ensemble.name() != params.name {
        return Err(ValidationError::NameMismatch {
            expected: params.name.clone(),
            found: ensemble.name().to_owned(),
        }
        .into());
    }
    if obs.name != params.name {
        return Err(ValidationError::NameMismatch {
            expected: params.name.clone(),
            found: obs.name.clone(),
        }
        .into());
    }

    // Every member must sit exactly one forecast step past the last
    // assimilation before this observation can be applied.
    for member in ensemble.members() {
        if member.sys_tim != obs.obs_tim || member.obs_tim != obs.obs_tim - 1 {
            return Err(ValidationError::TimestampMismatch {
                id: member.id,
                sys_tim: member.sys_tim,
                obs_tim: member.obs_tim,
                expected: obs.obs_tim,
            }
            .into());
        }
    }

    Ok(())
}

/// Apply one EnKF analysis step to the ensemble in place.
///
/// Validation runs to completion before any numeric work; on error the
/// ensemble is untouched. On success every member's `x` is replaced by
/// its analysis column and `obs_tim` advances by one; `sys_tim` is
/// unchanged.
///
/// The gain formulation is a pure cost decision: the ensemble-factored
/// form runs when the ensemble is smaller than both the state and the
/// observation, the direct form otherwise. Results agree to
/// floating-point tolerance either way.
///
/// # Errors
///
/// [`EngineError::Validation`] for any shape, name, or timestamp
/// violation, [`EngineError::Math`] if a decomposition fails.
pub fn analyse(
    params: &AnalysisParams,
    ensemble: &mut Ensemble,
    obs: &Observation,
) -> Result<(), EngineError> {
    validate(params, ensemble, obs)?;

    let (k, l, n) = (params.state_dim, params.obs_dim, params.members);

    let mut x = DMatrix::zeros(k, n);
    for member in ensemble.members() {
        x.column_mut(member.id as usize)
            .copy_from_slice(&member.x);
    }

    let h = params.operator.materialize(l, k);
    let r = params.obs_noise.covariance(l);

    let tall = n < l && n < k;
    debug!(members = n, state_dim = k, obs_dim = l, tall, "computing Kalman gain");
    let gain = if tall {
        kalman_gain_tall(&x, &h, &r)?
    } else {
        kalman_gain(&x, &h, &r)?
    };

    // Perturbed observations, re-centred so the perturbation mean is
    // exactly zero across the ensemble.
    let mut rng = analysis_stream(params.seed, obs.obs_tim);
    let w = params.obs_noise.sample(l, n, &mut rng);
    let y = DVector::from_column_slice(&obs.y) * RowDVector::from_element(n, 1.0);
    let d = y + mean_anomaly(&w);

    let x_next = &x + gain * (d - h * &x);

    for member in ensemble.members_mut() {
        let col = x_next.column(member.id as usize);
        for (dst, src) in member.x.iter_mut().zip(col.iter()) {
            *dst = *src;
        }
        member.obs_tim += 1;
    }

    Ok(())
}
