//! Validation errors for records and ensembles.

use std::error::Error;
use std::fmt;

/// A record or ensemble failed validation.
///
/// Validation always runs before any numeric work; a command that hits
/// one of these exits without writing anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A record carries an empty `name`.
    EmptyName,
    /// A state record carries an empty `x` vector.
    EmptyState,
    /// An observation record carries an empty `y` vector.
    EmptyObservation,
    /// A member id is negative.
    NegativeId {
        /// The offending id.
        id: i64,
    },
    /// A timestamp field is negative.
    NegativeTime {
        /// Which field (`sys_tim` or `obs_tim`).
        field: &'static str,
        /// The offending value.
        value: i64,
    },
    /// A member's state vector does not have the configured length `k`.
    StateSizeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// The observation vector does not have the configured length `l`.
    ObservationSizeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// Record names disagree across ensemble, observation, and parameters.
    NameMismatch {
        /// The name the parameters expect.
        expected: String,
        /// The name actually found on the record.
        found: String,
    },
    /// Two members share the same id.
    DuplicateId {
        /// The repeated id.
        id: i64,
    },
    /// Member ids do not cover `0..N-1` contiguously.
    NonContiguousIds {
        /// Number of members in the ensemble.
        members: usize,
    },
    /// An ensemble with no members was supplied.
    EmptyEnsemble,
    /// A member's timestamps are not exactly one forecast step past the
    /// last assimilation (`sys_tim == obs_tim_next`, `obs_tim == obs_tim_next - 1`).
    TimestampMismatch {
        /// The member's id.
        id: i64,
        /// The member's system time.
        sys_tim: i64,
        /// The member's observation time.
        obs_tim: i64,
        /// The observation time being assimilated.
        expected: i64,
    },
    /// A parameter vector has the wrong length.
    ParameterSize {
        /// Which parameter field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// A dimension parameter (`N`, `k`, `l`, or `t`) is zero.
    ZeroDimension {
        /// Which dimension.
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "no name given"),
            Self::EmptyState => write!(f, "no state vector given"),
            Self::EmptyObservation => write!(f, "no observation vector given"),
            Self::NegativeId { id } => write!(f, "invalid id given {id}"),
            Self::NegativeTime { field, value } => {
                write!(f, "invalid {field} given {value}")
            }
            Self::StateSizeMismatch { expected, found } => {
                write!(f, "invalid state size {found} != {expected}")
            }
            Self::ObservationSizeMismatch { expected, found } => {
                write!(f, "invalid observation size {found} != {expected}")
            }
            Self::NameMismatch { expected, found } => {
                write!(f, "invalid name '{found}' (expected '{expected}')")
            }
            Self::DuplicateId { id } => write!(f, "duplicate member id {id}"),
            Self::NonContiguousIds { members } => {
                write!(f, "member ids must cover 0..{members} contiguously")
            }
            Self::EmptyEnsemble => write!(f, "empty ensemble"),
            Self::TimestampMismatch {
                id,
                sys_tim,
                obs_tim,
                expected,
            } => {
                write!(
                    f,
                    "invalid timestamp on member {id}: sys_tim={sys_tim}, obs_tim={obs_tim}, \
                     assimilating obs_tim={expected}"
                )
            }
            Self::ParameterSize {
                field,
                expected,
                found,
            } => {
                write!(f, "invalid size of {field} given {found} != {expected}")
            }
            Self::ZeroDimension { field } => write!(f, "no {field} given"),
        }
    }
}

impl Error for ValidationError {}
