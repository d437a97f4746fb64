//! Particle filter analysis step.
//!
//! Recognized as a filter name but not implemented; selecting it fails
//! cleanly after argument handling instead of being reported as an
//! unknown filter.

use sift_core::{Ensemble, Observation};

use crate::error::EngineError;
use crate::AnalysisParams;

/// Always fails with [`EngineError::UnsupportedFilter`].
///
/// # Errors
///
/// Unconditionally.
pub fn analyse(
    _params: &AnalysisParams,
    _ensemble: &mut Ensemble,
    _obs: &Observation,
) -> Result<(), EngineError> {
    Err(EngineError::UnsupportedFilter {
        name: "particle".to_owned(),
    })
}
