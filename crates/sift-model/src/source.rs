//! The [`ModelSource`] capability boundary and the in-process registry.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use libloading::Library;

use crate::error::LoadError;
use crate::model::Model;

/// An instantiated model plus whatever keeps its code mapped.
///
/// For registry-built models there is nothing extra; for dynamically
/// loaded ones the handle owns the [`Library`]. The instance is
/// declared first so it drops before the library that backs it.
pub struct ModelHandle {
    model: Box<dyn Model>,
    _library: Option<Library>,
}

impl ModelHandle {
    /// Wrap an in-process instance.
    pub fn from_instance(model: Box<dyn Model>) -> Self {
        Self {
            model,
            _library: None,
        }
    }

    pub(crate) fn from_library(model: Box<dyn Model>, library: Library) -> Self {
        Self {
            model,
            _library: Some(library),
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("dynamic", &self._library.is_some())
            .finish_non_exhaustive()
    }
}

impl Deref for ModelHandle {
    type Target = dyn Model;

    fn deref(&self) -> &Self::Target {
        self.model.as_ref()
    }
}

impl DerefMut for ModelHandle {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.model.as_mut()
    }
}

/// Where model instances come from.
///
/// The engine and commands depend only on this trait; swapping the
/// dynamic loader for a registry (or anything else) changes no caller.
pub trait ModelSource {
    /// Instantiate the model behind a logical name.
    ///
    /// # Errors
    ///
    /// A [`LoadError`] is fatal to the invoking command.
    fn load(&self, name: &str) -> Result<ModelHandle, LoadError>;
}

type Constructor = Box<dyn Fn() -> Box<dyn Model> + Send + Sync>;

/// In-process name → constructor map.
///
/// The test and embedding counterpart of the dynamic loader: register
/// closures up front, load by name afterwards.
#[derive(Default)]
pub struct ModelRegistry {
    constructors: HashMap<String, Constructor>,
}

impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a logical name, replacing any
    /// previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }
}

impl ModelSource for ModelRegistry {
    fn load(&self, name: &str) -> Result<ModelHandle, LoadError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| LoadError::NotRegistered { name: name.into() })?;
        Ok(ModelHandle::from_instance(constructor()))
    }
}
