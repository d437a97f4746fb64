//! Twin-experiment observation generation.
//!
//! Integrates a single noise-free truth trajectory and records what the
//! observation operator would see at every step. The synthetic
//! observations feed the filter in place of real measurements.

use nalgebra::DVector;
use tracing::debug;

use sift_core::{Observation, ValidationError};
use sift_math::ObservationOperator;
use sift_model::{Model, Phase, StepContext};

use crate::error::EngineError;

/// Parameters for one observation-generation run.
#[derive(Clone, Debug)]
pub struct ObsgenParams {
    /// Experiment name stamped on every observation.
    pub name: String,
    /// Number of forward steps `t`; `t + 1` observations are produced,
    /// one per time `0..=t`.
    pub steps: usize,
    /// State dimension `k`.
    pub state_dim: usize,
    /// Observation dimension `l`.
    pub obs_dim: usize,
    /// True initial state, length `k`.
    pub truth: Vec<f64>,
    /// Observation operator `H`.
    pub operator: ObservationOperator,
}

fn validate(params: &ObsgenParams) -> Result<(), EngineError> {
    if params.name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if params.steps == 0 {
        return Err(ValidationError::ZeroDimension { field: "t" }.into());
    }
    if params.state_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "k" }.into());
    }
    if params.obs_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "l" }.into());
    }
    if params.truth.len() != params.state_dim {
        return Err(ValidationError::ParameterSize {
            field: "x0",
            expected: params.state_dim,
            found: params.truth.len(),
        }
        .into());
    }
    Ok(())
}

/// Generate `steps + 1` observations of the model's truth trajectory.
///
/// At each time `t` in `0..=steps` the current truth state is mapped
/// through `H`, then the model advances it one step with a zero noise
/// vector. The trajectory itself is never persisted.
///
/// # Errors
///
/// [`EngineError::Validation`] for bad parameters,
/// [`EngineError::Model`] if any step fails — no partial observation
/// list is returned.
pub fn generate(
    params: &ObsgenParams,
    model: &mut dyn Model,
) -> Result<Vec<Observation>, EngineError> {
    validate(params)?;

    let h = params.operator.materialize(params.obs_dim, params.state_dim);
    let zeros = vec![0.0; params.state_dim];
    let mut truth = params.truth.clone();
    let mut observations = Vec::with_capacity(params.steps + 1);

    for t in 0..=params.steps as i64 {
        let x = DVector::from_column_slice(&truth);
        let y = &h * x;
        observations.push(Observation {
            name: params.name.clone(),
            obs_tim: t,
            y: y.iter().copied().collect(),
        });

        debug!(sys_tim = t, "advancing truth trajectory");
        let ctx = StepContext::new(0, t, Phase::Observe);
        model.predict(&mut truth, &zeros, &ctx)?;
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_test_utils::{FailingModel, RecordingModel, ShiftModel};

    fn params(steps: usize, operator: ObservationOperator) -> ObsgenParams {
        ObsgenParams {
            name: "twin".to_owned(),
            steps,
            state_dim: 2,
            obs_dim: 2,
            truth: vec![0.0, 10.0],
            operator,
        }
    }

    #[test]
    fn produces_one_observation_per_time_including_zero() {
        let mut model = ShiftModel::new(1.0);
        let obs = generate(&params(3, ObservationOperator::Identity), &mut model).unwrap();
        assert_eq!(obs.len(), 4);
        for (t, o) in obs.iter().enumerate() {
            assert_eq!(o.name, "twin");
            assert_eq!(o.obs_tim, t as i64);
            assert_eq!(o.y, vec![t as f64, 10.0 + t as f64]);
        }
    }

    #[test]
    fn observes_before_stepping() {
        // The first observation must be of the initial truth, untouched.
        let mut model = ShiftModel::new(100.0);
        let obs = generate(&params(1, ObservationOperator::Identity), &mut model).unwrap();
        assert_eq!(obs[0].y, vec![0.0, 10.0]);
    }

    #[test]
    fn truth_trajectory_runs_in_observe_phase_with_zero_noise() {
        let mut model = RecordingModel::new();
        generate(&params(2, ObservationOperator::Identity), &mut model).unwrap();
        assert_eq!(model.calls.len(), 3);
        for (t, call) in model.calls.iter().enumerate() {
            assert_eq!(call.ctx, StepContext::new(0, t as i64, Phase::Observe));
            assert_eq!(call.noise, vec![0.0, 0.0]);
        }
    }

    #[test]
    fn applies_the_observation_operator() {
        // Observe only the second component.
        let mut p = params(2, ObservationOperator::parse(&[0.0, 1.0], 1, 2).unwrap());
        p.obs_dim = 1;
        let mut model = ShiftModel::new(1.0);
        let obs = generate(&p, &mut model).unwrap();
        assert_eq!(obs[0].y, vec![10.0]);
        assert_eq!(obs[2].y, vec![12.0]);
    }

    #[test]
    fn model_failure_aborts_the_run() {
        let mut model = FailingModel::new(1);
        let err = generate(&params(5, ObservationOperator::Identity), &mut model).unwrap_err();
        assert!(matches!(err, EngineError::Model(_)));
    }

    #[test]
    fn rejects_truth_of_wrong_length() {
        let mut p = params(1, ObservationOperator::Identity);
        p.truth = vec![0.0];
        let mut model = ShiftModel::new(1.0);
        assert!(matches!(
            generate(&p, &mut model).unwrap_err(),
            EngineError::Validation(ValidationError::ParameterSize { field: "x0", .. })
        ));
    }

    #[test]
    fn rejects_zero_steps() {
        let mut model = ShiftModel::new(1.0);
        assert!(matches!(
            generate(&params(0, ObservationOperator::Identity), &mut model).unwrap_err(),
            EngineError::Validation(ValidationError::ZeroDimension { field: "t" })
        ));
    }
}
