//! System-model contract and plugin loading for Sift.
//!
//! The assimilation engine is model-agnostic: anything implementing
//! [`Model`] can be advanced by the prediction driver or used to
//! generate twin-experiment truth trajectories. The engine depends only
//! on the trait; where instances come from is a capability boundary
//! behind [`ModelSource`], with two providers:
//!
//! - [`ModelRegistry`] — an in-process name → constructor map, used by
//!   tests and embedders;
//! - [`DynamicLoader`] — resolves a logical name against a search path
//!   and loads a shared library exporting the [`MODEL_ENTRY_POINT`]
//!   factory (emitted by [`export_model!`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod loader;
mod model;
mod source;

pub use error::{LoadError, ModelError};
pub use loader::{DynamicLoader, ModelConstructor, MODEL_ENTRY_POINT, MODEL_PATH_ENV};
pub use model::{Model, Phase, StepContext};
pub use source::{ModelHandle, ModelRegistry, ModelSource};

/// Emit the factory export a dynamically loaded model library needs.
///
/// Expands to an `extern "C"` function named after
/// [`MODEL_ENTRY_POINT`] returning the model boxed behind a `c_void`
/// pointer (trait-object pointers are not FFI-stable, so the trait
/// object is double-boxed). The loader reverses the dance.
///
/// ```
/// use sift_model::{export_model, Model, ModelError, StepContext};
///
/// #[derive(Default)]
/// struct Decay;
///
/// impl Model for Decay {
///     fn predict(
///         &mut self,
///         state: &mut [f64],
///         noise: &[f64],
///         _ctx: &StepContext,
///     ) -> Result<(), ModelError> {
///         for (x, w) in state.iter_mut().zip(noise) {
///             *x = 0.5 * *x + w;
///         }
///         Ok(())
///     }
/// }
///
/// export_model!(Decay::default());
/// ```
#[macro_export]
macro_rules! export_model {
    ($constructor:expr) => {
        #[no_mangle]
        pub extern "C" fn sift_model_create() -> *mut ::std::ffi::c_void {
            let model: ::std::boxed::Box<dyn $crate::Model> = ::std::boxed::Box::new($constructor);
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(model)) as *mut ::std::ffi::c_void
        }
    };
}
