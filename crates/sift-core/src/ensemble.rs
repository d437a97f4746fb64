//! The [`Ensemble`] collection and its id/shape invariants.

use crate::error::ValidationError;
use crate::record::State;

/// An ordered set of ensemble members sharing one experiment.
///
/// Construction enforces the invariants every assimilation operation
/// relies on: all members validate individually, share one name and one
/// state length, and their ids cover `0..N-1` exactly once. The id is
/// the column index each member occupies in the anomaly matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Ensemble {
    members: Vec<State>,
}

impl Ensemble {
    /// Build an ensemble from loose member records, checking invariants.
    ///
    /// Member order is preserved; ids need not arrive sorted.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the collection is empty, any
    /// member fails [`State::validate`], names or state lengths differ
    /// between members, or the ids are not a permutation of `0..N-1`.
    pub fn from_members(members: Vec<State>) -> Result<Self, ValidationError> {
        if members.is_empty() {
            return Err(ValidationError::EmptyEnsemble);
        }

        for member in &members {
            member.validate()?;
        }

        let name = &members[0].name;
        let k = members[0].x.len();
        for member in &members[1..] {
            if member.name != *name {
                return Err(ValidationError::NameMismatch {
                    expected: name.clone(),
                    found: member.name.clone(),
                });
            }
            if member.x.len() != k {
                return Err(ValidationError::StateSizeMismatch {
                    expected: k,
                    found: member.x.len(),
                });
            }
        }

        let n = members.len();
        let mut seen = vec![false; n];
        for member in &members {
            let id = member.id as usize;
            if id >= n {
                return Err(ValidationError::NonContiguousIds { members: n });
            }
            if seen[id] {
                return Err(ValidationError::DuplicateId { id: member.id });
            }
            seen[id] = true;
        }

        Ok(Self { members })
    }

    /// Number of members, `N`.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; construction rejects empty ensembles.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// State dimension `k` shared by every member.
    pub fn state_dim(&self) -> usize {
        self.members[0].x.len()
    }

    /// Experiment name shared by every member.
    pub fn name(&self) -> &str {
        &self.members[0].name
    }

    /// Shared read access to the members in their original order.
    pub fn members(&self) -> &[State] {
        &self.members
    }

    /// Mutable access to the members.
    ///
    /// Callers must preserve the construction invariants; the engine
    /// only rewrites `x` vectors in place and bumps timestamps.
    pub fn members_mut(&mut self) -> &mut [State] {
        &mut self.members
    }

    /// Consume the ensemble, yielding the member records for persistence.
    pub fn into_members(self) -> Vec<State> {
        self.members
    }
}
