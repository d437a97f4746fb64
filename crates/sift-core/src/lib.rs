//! Core records and validation for the Sift data-assimilation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value records exchanged between assimilation commands — ensemble
//! member [`State`]s and [`Observation`]s — the [`Ensemble`] collection
//! with its id/shape invariants, and the [`ValidationError`] type that
//! every command checks against before doing any numeric work.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod ensemble;
mod error;
mod record;

pub use ensemble::Ensemble;
pub use error::ValidationError;
pub use record::{Observation, State};
