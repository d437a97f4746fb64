//! Error types for persistence and filename handling.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors reading, writing, or naming record files.
#[derive(Debug)]
pub enum IoError {
    /// The file does not exist.
    NotFound {
        /// The missing path.
        path: PathBuf,
    },
    /// The path exists but is not a regular file.
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },
    /// An underlying I/O operation failed.
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The OS-level error.
        source: io::Error,
    },
    /// The file is not valid JSON, or its top level is not an object.
    Parse {
        /// The offending file.
        path: PathBuf,
        /// Parser detail.
        detail: String,
    },
    /// Merged parameter files do not deserialize into the expected schema.
    InvalidParams {
        /// Deserializer detail.
        detail: String,
    },
    /// Refusing to overwrite an existing file without `--force`.
    AlreadyExists {
        /// The existing file.
        path: PathBuf,
    },
    /// A sequence pattern matched no file at all.
    NoMatch {
        /// The pattern as given.
        pattern: String,
    },
    /// A sequence pattern carries more than one placeholder.
    BadPattern {
        /// The pattern as given.
        pattern: String,
        /// How many placeholders were found.
        placeholders: usize,
    },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "{} not exists", path.display()),
            Self::NotAFile { path } => {
                write!(f, "{} is not a regular file", path.display())
            }
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, detail } => write!(f, "{}: {detail}", path.display()),
            Self::InvalidParams { detail } => {
                write!(f, "invalid parameter file: {detail}")
            }
            Self::AlreadyExists { path } => {
                write!(f, "{} already exists", path.display())
            }
            Self::NoMatch { pattern } => {
                write!(f, "{pattern} does not match to any file")
            }
            Self::BadPattern {
                pattern,
                placeholders,
            } => {
                write!(
                    f,
                    "{pattern}: only 1 placeholder allowed but found {placeholders}"
                )
            }
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
