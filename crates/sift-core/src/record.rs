//! Persisted value records: ensemble member states and observations.
//!
//! Field names match the on-disk JSON schema exactly; field order in
//! the file is irrelevant. Records are per-invocation value objects —
//! there is no in-memory store, every command re-reads and re-emits
//! full snapshots.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One ensemble member's state at a point in the forecast/analysis cycle.
///
/// `sys_tim` counts forward-model steps, `obs_tim` counts assimilated
/// observations. A freshly initialized member has both at zero; the
/// prediction driver advances `sys_tim` per member, the filter advances
/// `obs_tim` for all members together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Experiment name shared by every record of one assimilation run.
    pub name: String,
    /// Member index in `0..N`; the anomaly-matrix column this member fills.
    pub id: i64,
    /// Number of forward-model steps taken.
    pub sys_tim: i64,
    /// Number of observations assimilated.
    pub obs_tim: i64,
    /// State vector of length `k`.
    pub x: Vec<f64>,
}

impl State {
    /// Check the record-local invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty name, negative id,
    /// negative `sys_tim` or `obs_tim`, or an empty state vector.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.id < 0 {
            return Err(ValidationError::NegativeId { id: self.id });
        }
        if self.sys_tim < 0 {
            return Err(ValidationError::NegativeTime {
                field: "sys_tim",
                value: self.sys_tim,
            });
        }
        if self.obs_tim < 0 {
            return Err(ValidationError::NegativeTime {
                field: "obs_tim",
                value: self.obs_tim,
            });
        }
        if self.x.is_empty() {
            return Err(ValidationError::EmptyState);
        }
        Ok(())
    }
}

/// An observation of the true system at one assimilation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Experiment name; must match the ensemble being corrected.
    pub name: String,
    /// Assimilation time this observation belongs to.
    pub obs_tim: i64,
    /// Observation vector of length `l`.
    pub y: Vec<f64>,
}

impl Observation {
    /// Check the record-local invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty name, negative
    /// `obs_tim`, or an empty observation vector.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.obs_tim < 0 {
            return Err(ValidationError::NegativeTime {
                field: "obs_tim",
                value: self.obs_tim,
            });
        }
        if self.y.is_empty() {
            return Err(ValidationError::EmptyObservation);
        }
        Ok(())
    }
}
