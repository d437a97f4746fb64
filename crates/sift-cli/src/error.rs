//! The command-level error type.

use std::fmt;
use std::path::PathBuf;

use sift_engine::EngineError;
use sift_io::IoError;
use sift_math::MathError;
use sift_model::{LoadError, ModelError};

/// Any failure a command can exit with.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a record or parameter file failed.
    Io(IoError),
    /// An assimilation operation failed.
    Engine(EngineError),
    /// A covariance or operator vector had the wrong shape.
    Math(MathError),
    /// The model library could not be resolved or loaded.
    Load(LoadError),
    /// The `--model-option` file does not exist.
    OptionFileMissing {
        /// The path as given.
        path: PathBuf,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Engine(e) => write!(f, "{e}"),
            Self::Math(e) => write!(f, "{e}"),
            Self::Load(e) => write!(f, "{e}"),
            Self::OptionFileMissing { path } => {
                write!(f, "{} not exist", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Math(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::OptionFileMissing { .. } => None,
        }
    }
}

impl From<IoError> for CliError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<MathError> for CliError {
    fn from(e: MathError) -> Self {
        Self::Math(e)
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        Self::Engine(EngineError::Model(e))
    }
}

impl From<sift_core::ValidationError> for CliError {
    fn from(e: sift_core::ValidationError) -> Self {
        Self::Engine(EngineError::Validation(e))
    }
}
