//! Error types for model execution and plugin loading.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors signalled by a system model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// The configuration hook rejected its options.
    ConfigurationFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A predict step failed.
    PredictionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationFailed { reason } => {
                write!(f, "model configuration failed: {reason}")
            }
            Self::PredictionFailed { reason } => write!(f, "model prediction failed: {reason}"),
        }
    }
}

impl Error for ModelError {}

/// Errors resolving or loading a model. Always fatal to the invoking
/// command.
#[derive(Debug)]
pub enum LoadError {
    /// No library matching the logical name exists on the search path.
    /// Every directory tried is listed.
    NotFound {
        /// The logical model name.
        name: String,
        /// Every path that was checked, in search order.
        searched: Vec<PathBuf>,
    },
    /// The name is not present in an in-process registry.
    NotRegistered {
        /// The logical model name.
        name: String,
    },
    /// The library file exists but could not be loaded.
    Open {
        /// The library path.
        path: PathBuf,
        /// Loader detail from the platform.
        detail: String,
    },
    /// The library loads but lacks the factory export.
    MissingEntryPoint {
        /// The library path.
        path: PathBuf,
        /// Symbol-lookup detail from the platform.
        detail: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name, searched } => {
                write!(f, "model '{name}' not found in the following paths:")?;
                for path in searched {
                    write!(f, "\n  {}", path.display())?;
                }
                Ok(())
            }
            Self::NotRegistered { name } => {
                write!(f, "model '{name}' is not registered")
            }
            Self::Open { path, detail } => {
                write!(f, "could not load {}: {detail}", path.display())
            }
            Self::MissingEntryPoint { path, detail } => {
                write!(
                    f,
                    "{} has no model factory export ({detail}); \
                     was it built with export_model!?",
                    path.display()
                )
            }
        }
    }
}

impl Error for LoadError {}
