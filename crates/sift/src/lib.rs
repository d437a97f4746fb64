//! Sift: sequential ensemble data assimilation over JSON snapshots.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Sift sub-crates. For library users, adding `sift` as a
//! single dependency is sufficient; the `sift` binary lives in
//! `sift-cli`.
//!
//! # Quick start
//!
//! ```rust
//! use sift::prelude::*;
//!
//! // A one-dimensional random walk as the system model.
//! struct Walk;
//! impl Model for Walk {
//!     fn predict(
//!         &mut self,
//!         state: &mut [f64],
//!         noise: &[f64],
//!         _ctx: &StepContext,
//!     ) -> Result<(), ModelError> {
//!         for (x, w) in state.iter_mut().zip(noise) {
//!             *x += w;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! // Draw an initial ensemble around x0 = 0.
//! let init = InitParams {
//!     name: "walk".into(),
//!     seed: 7,
//!     members: 8,
//!     state_dim: 1,
//!     mean: vec![0.0],
//!     variance: vec![1.0],
//! };
//! let mut ensemble = sift::engine::init::draw(&init).unwrap();
//!
//! // One forecast step per member, then assimilate an observation.
//! let predict = PredictParams {
//!     name: "walk".into(),
//!     seed: 7,
//!     state_dim: 1,
//!     process_noise: NoiseModel::parse("Q", &[0.1], 1).unwrap(),
//! };
//! let mut model = Walk;
//! for member in ensemble.members_mut() {
//!     sift::engine::predict::advance(&predict, member, &mut model).unwrap();
//! }
//!
//! let analysis = AnalysisParams {
//!     name: "walk".into(),
//!     seed: 7,
//!     members: 8,
//!     state_dim: 1,
//!     obs_dim: 1,
//!     obs_noise: NoiseModel::parse("R", &[0.25], 1).unwrap(),
//!     operator: ObservationOperator::Identity,
//! };
//! let obs = Observation { name: "walk".into(), obs_tim: 1, y: vec![0.3] };
//! sift::engine::analyse("enkf", &analysis, &mut ensemble, &obs).unwrap();
//! assert!(ensemble.members().iter().all(|m| m.obs_tim == 1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `sift-core` | State and observation records, ensemble invariants |
//! | [`math`] | `sift-math` | Anomalies, Kalman gains, noise models, random streams |
//! | [`model`] | `sift-model` | The `Model` trait, plugin loading, `export_model!` |
//! | [`engine`] | `sift-engine` | Filters and the init/predict/obsgen drivers |
//! | [`io`] | `sift-io` | JSON persistence, filename conventions, parameter schemas |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Records and ensemble invariants (`sift-core`).
pub use sift_core as core;

/// Ensemble linear algebra and random streams (`sift-math`).
pub use sift_math as math;

/// System-model contract and plugin loading (`sift-model`).
///
/// The [`model::Model`] trait is the main extension point; implement it
/// and emit the plugin entry point with [`model::export_model!`](export_model).
pub use sift_model as model;

/// Filters and sequential drivers (`sift-engine`).
pub use sift_engine as engine;

/// JSON persistence and filename conventions (`sift-io`).
pub use sift_io as io;

pub use sift_model::export_model;

/// Common imports for typical Sift usage.
///
/// ```rust
/// use sift::prelude::*;
/// ```
pub mod prelude {
    pub use sift_core::{Ensemble, Observation, State, ValidationError};
    pub use sift_engine::{
        analyse, AnalysisParams, EngineError, InitParams, ObsgenParams, PredictParams,
    };
    pub use sift_math::{MathError, NoiseModel, ObservationOperator};
    pub use sift_model::{
        Model, ModelError, ModelHandle, ModelRegistry, ModelSource, Phase, StepContext,
    };
}
