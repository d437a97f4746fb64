//! Dynamic loading of model libraries.
//!
//! A logical model name resolves against a search path — the
//! [`MODEL_PATH_ENV`] environment variable if set, then one built-in
//! default — using the platform's shared-library naming convention.
//! The matched library must carry a single factory export,
//! [`MODEL_ENTRY_POINT`], normally emitted by the
//! [`export_model!`](crate::export_model) macro.

use std::env;
use std::ffi::{c_void, OsStr};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::debug;

use crate::error::LoadError;
use crate::model::Model;
use crate::source::{ModelHandle, ModelSource};

/// Name of the factory export every model library must provide.
pub const MODEL_ENTRY_POINT: &str = "sift_model_create";

/// Environment variable overriding the model search path.
pub const MODEL_PATH_ENV: &str = "SIFT_MODEL_PATH";

const DEFAULT_MODEL_DIR: &str = "/usr/local/lib/sift";

/// Signature of the factory export.
///
/// The returned pointer is `Box::into_raw` of a `Box<Box<dyn Model>>`;
/// trait-object (fat) pointers are not FFI-stable, the double box is.
pub type ModelConstructor = unsafe extern "C" fn() -> *mut c_void;

/// [`ModelSource`] provider backed by `libloading`.
///
/// The production counterpart of
/// [`ModelRegistry`](crate::source::ModelRegistry). A loaded library is
/// exclusively owned by the invoking command for its process lifetime;
/// there is no reload or unload mid-invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicLoader;

impl DynamicLoader {
    /// A loader with the default search-path behavior.
    pub fn new() -> Self {
        Self
    }

    /// The directories searched, in order: every entry of
    /// [`MODEL_PATH_ENV`] when set, then the built-in default.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = env::var_os(MODEL_PATH_ENV)
            .map(|raw| split_search_paths(&raw))
            .unwrap_or_default();
        paths.push(PathBuf::from(DEFAULT_MODEL_DIR));
        paths
    }

    /// The platform file name for a logical model name
    /// (e.g. `advection` → `libadvection.so` on Linux).
    pub fn library_filename(name: &str) -> String {
        format!("{}{name}{}", env::consts::DLL_PREFIX, env::consts::DLL_SUFFIX)
    }

    /// Whether `path` names an existing regular file following the
    /// platform library convention.
    pub fn is_model_library(path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            return false;
        };
        file_name.starts_with(env::consts::DLL_PREFIX)
            && file_name.ends_with(env::consts::DLL_SUFFIX)
            && path.is_file()
    }

    /// Resolve a logical name to a library path.
    ///
    /// # Errors
    ///
    /// [`LoadError::NotFound`] listing every path tried.
    pub fn resolve(name: &str) -> Result<PathBuf, LoadError> {
        let file_name = Self::library_filename(name);
        let mut searched = Vec::new();
        for dir in Self::search_paths() {
            let candidate = dir.join(&file_name);
            if Self::is_model_library(&candidate) {
                debug!(path = %candidate.display(), "resolved model library");
                return Ok(candidate);
            }
            searched.push(candidate);
        }
        Err(LoadError::NotFound {
            name: name.into(),
            searched,
        })
    }

    /// Load a library file and instantiate its model.
    ///
    /// # Errors
    ///
    /// [`LoadError::Open`] if the library cannot be mapped,
    /// [`LoadError::MissingEntryPoint`] if the factory export is absent.
    pub fn load_path(path: &Path) -> Result<ModelHandle, LoadError> {
        // SAFETY: loading runs arbitrary library initializers; that is
        // the entire point of the plugin boundary. The caller chose the
        // library.
        let library = unsafe { Library::new(path) }.map_err(|e| LoadError::Open {
            path: path.to_owned(),
            detail: e.to_string(),
        })?;

        let raw = {
            // SAFETY: the export is only ever emitted by export_model!
            // with exactly the ModelConstructor signature.
            let constructor: Symbol<'_, ModelConstructor> =
                unsafe { library.get(MODEL_ENTRY_POINT.as_bytes()) }.map_err(|e| {
                    LoadError::MissingEntryPoint {
                        path: path.to_owned(),
                        detail: e.to_string(),
                    }
                })?;
            unsafe { constructor() }
        };

        // SAFETY: reverses the Box::into_raw in export_model!.
        let model = unsafe { *Box::from_raw(raw as *mut Box<dyn Model>) };
        debug!(path = %path.display(), "loaded model library");
        Ok(ModelHandle::from_library(model, library))
    }
}

impl ModelSource for DynamicLoader {
    /// Load by logical name, or directly by path when `name` already
    /// points at a model library file.
    fn load(&self, name: &str) -> Result<ModelHandle, LoadError> {
        let direct = Path::new(name);
        let path = if DynamicLoader::is_model_library(direct) {
            direct.to_owned()
        } else {
            DynamicLoader::resolve(name)?
        };
        DynamicLoader::load_path(&path)
    }
}

fn split_search_paths(raw: &OsStr) -> Vec<PathBuf> {
    env::split_paths(raw).filter(|p| !p.as_os_str().is_empty()).collect()
}
