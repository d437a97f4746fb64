//! The [`Model`] trait and per-call [`StepContext`].

use std::path::Path;

use crate::error::ModelError;

/// Why the model is being stepped.
///
/// A single implementation may branch on this — e.g. integrate with a
/// finer scheme for the truth trajectory — without per-context
/// subclassing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Advancing one ensemble member during a forecast step.
    Predict,
    /// Advancing the noise-free truth trajectory during twin-experiment
    /// observation generation.
    Observe,
}

/// Read-only invocation context handed to every [`Model::predict`] call.
///
/// The caller constructs a fresh value per call; models never see
/// mutable shared state they do not own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepContext {
    /// Id of the member being advanced; `0` for the single truth
    /// trajectory in observation generation.
    pub member_id: i64,
    /// System time before this step.
    pub sys_tim: i64,
    /// Whether this is a forecast step or truth-trajectory generation.
    pub phase: Phase,
}

impl StepContext {
    /// Build a context for one step call.
    pub fn new(member_id: i64, sys_tim: i64, phase: Phase) -> Self {
        Self {
            member_id,
            sys_tim,
            phase,
        }
    }
}

/// A forward system model, opaque to the assimilation engine.
///
/// # Contract
///
/// - `predict()` advances `state` in place by exactly one discrete
///   step. The caller supplies `noise` (process perturbation, possibly
///   all zeros); the model — not the caller — decides how it enters the
///   dynamics.
/// - `state.len()` equals the configured state dimension `k` and must
///   not change meaning across calls; `noise.len() == state.len()`.
/// - Determinism: identical `(state, noise, ctx)` must produce
///   identical output. All stochasticity arrives through `noise`.
/// - Models are called from a single thread; a call that never returns
///   blocks the invoking command indefinitely (no timeout is modeled).
///
/// # Object safety
///
/// The trait is object-safe; drivers take `&mut dyn Model` and loaders
/// hand out `Box<dyn Model>`.
pub trait Model: Send + 'static {
    /// One-time configuration hook, run after loading and before any
    /// `predict` call. `options` is the path of an options file when
    /// the user supplied one.
    ///
    /// The default accepts anything and does nothing.
    ///
    /// # Errors
    ///
    /// Implementations reject unusable options with
    /// [`ModelError::ConfigurationFailed`]; the invoking command fails.
    fn configure(&mut self, options: Option<&Path>) -> Result<(), ModelError> {
        let _ = options;
        Ok(())
    }

    /// Advance `state` in place by one discrete step, consuming `noise`.
    ///
    /// # Errors
    ///
    /// [`ModelError::PredictionFailed`] aborts the invoking command;
    /// no partial state is persisted.
    fn predict(
        &mut self,
        state: &mut [f64],
        noise: &[f64],
        ctx: &StepContext,
    ) -> Result<(), ModelError>;
}
