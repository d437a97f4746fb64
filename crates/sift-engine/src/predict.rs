//! The forecast driver: advance one member by one model step.

use tracing::debug;

use sift_core::{State, ValidationError};
use sift_math::{prediction_stream, NoiseModel};
use sift_model::{Model, Phase, StepContext};

use crate::error::EngineError;

/// Parameters for one prediction step.
#[derive(Clone, Debug)]
pub struct PredictParams {
    /// Experiment name the state must carry.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// State dimension `k`.
    pub state_dim: usize,
    /// Process-noise covariance `Q`; absent means a zero noise vector.
    pub process_noise: NoiseModel,
}

fn validate(params: &PredictParams, state: &State) -> Result<(), EngineError> {
    state.validate()?;

    if params.state_dim == 0 {
        return Err(ValidationError::ZeroDimension { field: "k" }.into());
    }
    if state.x.len() != params.state_dim {
        return Err(ValidationError::StateSizeMismatch {
            expected: params.state_dim,
            found: state.x.len(),
        }
        .into());
    }
    if state.name != params.name {
        return Err(ValidationError::NameMismatch {
            expected: params.name.clone(),
            found: state.name.clone(),
        }
        .into());
    }
    Ok(())
}

/// Advance `state` by one forward-model step, in place.
///
/// The process-noise draw comes from a stream derived from the base
/// seed, the member id, and the current `sys_tim`, so per-member
/// invocations are reproducible in any order. With `Q` absent the model
/// receives a zero noise vector and the step is fully deterministic.
///
/// On success `sys_tim` advances by one; `obs_tim` is untouched.
///
/// # Errors
///
/// [`EngineError::Validation`] before any model call;
/// [`EngineError::Model`] if the model rejects the step, in which case
/// `sys_tim` is not advanced and the state must not be persisted.
pub fn advance(
    params: &PredictParams,
    state: &mut State,
    model: &mut dyn Model,
) -> Result<(), EngineError> {
    validate(params, state)?;

    let noise = if params.process_noise.is_absent() {
        vec![0.0; params.state_dim]
    } else {
        let mut rng = prediction_stream(params.seed, state.id, state.sys_tim);
        let w = params
            .process_noise
            .sample(params.state_dim, 1, &mut rng);
        w.column(0).iter().copied().collect()
    };

    let ctx = StepContext::new(state.id, state.sys_tim, Phase::Predict);
    debug!(id = state.id, sys_tim = state.sys_tim, "advancing member");
    model.predict(&mut state.x, &noise, &ctx)?;
    state.sys_tim += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_test_utils::fixtures::member_at;
    use sift_test_utils::{FailingModel, RecordingModel, ShiftModel};

    fn params(noise: NoiseModel) -> PredictParams {
        PredictParams {
            name: "demo".to_owned(),
            seed: 7,
            state_dim: 2,
            process_noise: noise,
        }
    }

    #[test]
    fn advances_state_and_sys_tim() {
        let mut state = member_at("demo", 0, 3, 3, vec![1.0, 2.0]);
        let mut model = ShiftModel::new(0.5);
        advance(&params(NoiseModel::Absent), &mut state, &mut model).unwrap();
        assert_eq!(state.x, vec![1.5, 2.5]);
        assert_eq!(state.sys_tim, 4);
        assert_eq!(state.obs_tim, 3);
    }

    #[test]
    fn absent_process_noise_is_all_zeros() {
        let mut state = member_at("demo", 1, 0, 0, vec![0.0, 0.0]);
        let mut model = RecordingModel::new();
        advance(&params(NoiseModel::Absent), &mut state, &mut model).unwrap();
        assert_eq!(model.calls[0].noise, vec![0.0, 0.0]);
        assert_eq!(model.calls[0].ctx, StepContext::new(1, 0, Phase::Predict));
    }

    #[test]
    fn noise_is_reproducible_per_member_and_time() {
        let q = NoiseModel::parse("Q", &[1.0, 1.0], 2).unwrap();

        let mut a = member_at("demo", 2, 5, 5, vec![0.0, 0.0]);
        let mut ma = RecordingModel::new();
        advance(&params(q.clone()), &mut a, &mut ma).unwrap();

        let mut b = member_at("demo", 2, 5, 5, vec![0.0, 0.0]);
        let mut mb = RecordingModel::new();
        advance(&params(q.clone()), &mut b, &mut mb).unwrap();

        assert_eq!(ma.calls[0].noise, mb.calls[0].noise);
        assert!(ma.calls[0].noise.iter().any(|w| *w != 0.0));

        // A different member at the same time draws differently.
        let mut c = member_at("demo", 3, 5, 5, vec![0.0, 0.0]);
        let mut mc = RecordingModel::new();
        advance(&params(q), &mut c, &mut mc).unwrap();
        assert_ne!(ma.calls[0].noise, mc.calls[0].noise);
    }

    #[test]
    fn model_failure_does_not_advance_time() {
        let mut state = member_at("demo", 0, 2, 2, vec![1.0, 1.0]);
        let mut model = FailingModel::new(0);
        let err = advance(&params(NoiseModel::Absent), &mut state, &mut model).unwrap_err();
        assert!(matches!(err, EngineError::Model(_)));
        assert_eq!(state.sys_tim, 2);
    }

    #[test]
    fn rejects_wrong_state_size() {
        let mut state = member_at("demo", 0, 0, 0, vec![1.0, 2.0, 3.0]);
        let mut model = ShiftModel::new(1.0);
        assert!(matches!(
            advance(&params(NoiseModel::Absent), &mut state, &mut model).unwrap_err(),
            EngineError::Validation(ValidationError::StateSizeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_wrong_name() {
        let mut state = member_at("other", 0, 0, 0, vec![1.0, 2.0]);
        let mut model = ShiftModel::new(1.0);
        assert!(matches!(
            advance(&params(NoiseModel::Absent), &mut state, &mut model).unwrap_err(),
            EngineError::Validation(ValidationError::NameMismatch { .. })
        ));
    }
}
