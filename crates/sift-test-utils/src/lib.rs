//! Test utilities and mock models for Sift development.
//!
//! Provides mock implementations of the [`Model`] trait plus record
//! fixtures for constructing valid test ensembles and observations.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use sift_model::{Model, ModelError, StepContext};

pub mod fixtures;

/// Adds a fixed shift plus the supplied noise to every component.
///
/// The simplest non-trivial dynamics: after `t` steps with zero noise,
/// every component has moved by `t * shift`, so drivers can be checked
/// arithmetically.
pub struct ShiftModel {
    pub shift: f64,
}

impl ShiftModel {
    pub fn new(shift: f64) -> Self {
        Self { shift }
    }
}

impl Model for ShiftModel {
    fn predict(
        &mut self,
        state: &mut [f64],
        noise: &[f64],
        _ctx: &StepContext,
    ) -> Result<(), ModelError> {
        for (x, w) in state.iter_mut().zip(noise) {
            *x += self.shift + w;
        }
        Ok(())
    }
}

/// Fails deterministically after a configured number of calls.
///
/// Useful for checking that drivers abort cleanly and persist nothing
/// when a model errors mid-run.
pub struct FailingModel {
    calls_before_failure: usize,
    calls: usize,
}

impl FailingModel {
    /// Succeed `calls_before_failure` times, then fail every call after.
    pub fn new(calls_before_failure: usize) -> Self {
        Self {
            calls_before_failure,
            calls: 0,
        }
    }
}

impl Model for FailingModel {
    fn predict(
        &mut self,
        _state: &mut [f64],
        _noise: &[f64],
        _ctx: &StepContext,
    ) -> Result<(), ModelError> {
        self.calls += 1;
        if self.calls > self.calls_before_failure {
            return Err(ModelError::PredictionFailed {
                reason: format!("deliberate failure on call {}", self.calls),
            });
        }
        Ok(())
    }
}

/// Records every invocation and leaves the state untouched.
///
/// Inspect [`calls`](RecordingModel::calls) afterwards to assert how a
/// driver sequenced its step contexts and what noise it supplied.
#[derive(Default)]
pub struct RecordingModel {
    pub calls: Vec<RecordedCall>,
    pub configured_with: Option<Option<std::path::PathBuf>>,
}

/// One recorded [`Model::predict`] invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub ctx: StepContext,
    pub state: Vec<f64>,
    pub noise: Vec<f64>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Model for RecordingModel {
    fn configure(
        &mut self,
        options: Option<&std::path::Path>,
    ) -> Result<(), ModelError> {
        self.configured_with = Some(options.map(std::path::Path::to_path_buf));
        Ok(())
    }

    fn predict(
        &mut self,
        state: &mut [f64],
        noise: &[f64],
        ctx: &StepContext,
    ) -> Result<(), ModelError> {
        self.calls.push(RecordedCall {
            ctx: *ctx,
            state: state.to_vec(),
            noise: noise.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_model::Phase;

    #[test]
    fn shift_model_moves_every_component() {
        let mut model = ShiftModel::new(0.5);
        let mut state = vec![1.0, 2.0];
        let ctx = StepContext::new(0, 0, Phase::Predict);
        model.predict(&mut state, &[0.0, 1.0], &ctx).unwrap();
        assert_eq!(state, vec![1.5, 3.5]);
    }

    #[test]
    fn failing_model_fails_after_budget() {
        let mut model = FailingModel::new(2);
        let ctx = StepContext::new(0, 0, Phase::Predict);
        let mut state = vec![0.0];
        assert!(model.predict(&mut state, &[0.0], &ctx).is_ok());
        assert!(model.predict(&mut state, &[0.0], &ctx).is_ok());
        assert!(model.predict(&mut state, &[0.0], &ctx).is_err());
    }

    #[test]
    fn recording_model_captures_contexts() {
        let mut model = RecordingModel::new();
        let mut state = vec![3.0];
        let ctx = StepContext::new(4, 7, Phase::Observe);
        model.predict(&mut state, &[0.25], &ctx).unwrap();
        assert_eq!(model.calls.len(), 1);
        assert_eq!(model.calls[0].ctx, ctx);
        assert_eq!(model.calls[0].noise, vec![0.25]);
        assert_eq!(state, vec![3.0]);
    }
}
