//! The engine error type, unifying everything a command can hit.

use std::error::Error;
use std::fmt;

use sift_core::ValidationError;
use sift_math::MathError;
use sift_model::ModelError;

/// Any failure inside an assimilation operation.
///
/// Operations are all-or-nothing: an error means no record was modified
/// in a way the caller may persist.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// A record, ensemble, or parameter set failed validation.
    Validation(ValidationError),
    /// A linear-algebra kernel failed.
    Math(MathError),
    /// The system model rejected a configure or predict call.
    Model(ModelError),
    /// The named filter exists but has no implementation yet.
    UnsupportedFilter {
        /// The filter name.
        name: String,
    },
    /// The named filter does not exist.
    UnknownFilter {
        /// The filter name as given.
        name: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Math(e) => write!(f, "{e}"),
            Self::Model(e) => write!(f, "{e}"),
            Self::UnsupportedFilter { name } => {
                write!(f, "filter '{name}' not supported yet")
            }
            Self::UnknownFilter { name } => write!(f, "invalid filter '{name}' given"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Math(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::UnsupportedFilter { .. } | Self::UnknownFilter { .. } => None,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<MathError> for EngineError {
    fn from(e: MathError) -> Self {
        Self::Math(e)
    }
}

impl From<ModelError> for EngineError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}
