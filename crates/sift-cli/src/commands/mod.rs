//! Command implementations.
//!
//! Each command is a function from parsed arguments to the list of
//! files it wrote, so the whole surface is testable without spawning a
//! process. Commands that run a system model take a [`ModelSource`];
//! the binary passes the dynamic loader, tests pass a registry.

use std::fs;
use std::path::Path;

use sift_io::IoError;
use sift_model::{ModelHandle, ModelSource};

use crate::error::CliError;

pub mod filter;
pub mod init;
pub mod obsgen;
pub mod predict;

pub(crate) fn ensure_output_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|source| IoError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(())
}

/// Load and configure a model. The option file, when given, must exist
/// before the model ever sees it.
pub(crate) fn load_model(
    source: &dyn ModelSource,
    name: &str,
    option: Option<&Path>,
) -> Result<ModelHandle, CliError> {
    if let Some(path) = option {
        if !path.exists() {
            return Err(CliError::OptionFileMissing {
                path: path.to_owned(),
            });
        }
    }
    let mut handle = source.load(name)?;
    handle.configure(option)?;
    Ok(handle)
}

#[cfg(test)]
pub(crate) mod testing {
    use sift_model::{Model, ModelRegistry};

    /// A registry with one model under the given name.
    pub fn registry_with<F>(name: &str, constructor: F) -> ModelRegistry
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        let mut registry = ModelRegistry::new();
        registry.register(name, constructor);
        registry
    }
}
