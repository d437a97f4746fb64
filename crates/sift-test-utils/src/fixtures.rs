//! Reusable record fixtures.
//!
//! Builders for valid [`State`], [`Observation`], and [`Ensemble`]
//! values so tests only spell out what they are actually exercising.

use sift_core::{Ensemble, Observation, State};

/// A valid member state at the start of an experiment
/// (`sys_tim == obs_tim == 0`).
pub fn member(name: &str, id: i64, x: Vec<f64>) -> State {
    State {
        name: name.to_owned(),
        id,
        sys_tim: 0,
        obs_tim: 0,
        x,
    }
}

/// A valid member state at an arbitrary point in an experiment.
pub fn member_at(name: &str, id: i64, sys_tim: i64, obs_tim: i64, x: Vec<f64>) -> State {
    State {
        name: name.to_owned(),
        id,
        sys_tim,
        obs_tim,
        x,
    }
}

/// A valid observation record.
pub fn observation(name: &str, obs_tim: i64, y: Vec<f64>) -> Observation {
    Observation {
        name: name.to_owned(),
        obs_tim,
        y,
    }
}

/// An ensemble of `n` members, each at state `x` with ids `0..n`.
pub fn uniform_ensemble(name: &str, n: usize, x: Vec<f64>) -> Ensemble {
    let members = (0..n as i64)
        .map(|id| member(name, id, x.clone()))
        .collect();
    Ensemble::from_members(members).expect("fixture ensemble is valid")
}
