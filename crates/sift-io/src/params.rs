//! Parameter-file schemas, one per command.
//!
//! Field names mirror the on-disk JSON exactly, including the
//! conventional uppercase matrix names (`N`, `Q`, `R`, `H`, `V0`).
//! Covariances and the observation operator arrive as flat vectors and
//! are dispatched on length exactly once, here, on the way into the
//! engine's typed parameter structs.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use sift_engine::{AnalysisParams, InitParams, ObsgenParams, PredictParams};
use sift_math::{MathError, NoiseModel, ObservationOperator};

use crate::error::IoError;
use crate::filename::expand_sequence;
use crate::json::read_merged;

/// Expand each `--param` argument and deserialize the shallow merge of
/// every resulting file.
///
/// # Errors
///
/// Any expansion or read failure, or [`IoError::InvalidParams`] when
/// the merged object does not fit the schema.
pub fn load_params<T: DeserializeOwned>(patterns: &[String]) -> Result<T, IoError> {
    let mut files = Vec::new();
    for pattern in patterns {
        files.extend(expand_sequence(pattern)?);
    }
    let merged = read_merged(&files)?;
    serde_json::from_value(merged).map_err(|e| IoError::InvalidParams {
        detail: e.to_string(),
    })
}

/// Read one record file (state or observation).
///
/// # Errors
///
/// As [`crate::json::read_record`].
pub fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    crate::json::read_record(path)
}

/// `init` parameter file.
#[derive(Clone, Debug, Deserialize)]
pub struct InitParamFile {
    /// Experiment name.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Ensemble size.
    #[serde(rename = "N")]
    pub members: usize,
    /// State dimension.
    pub k: usize,
    /// Initial mean, length `k`.
    pub x0: Vec<f64>,
    /// Per-component initial variances, length `k`.
    #[serde(rename = "V0")]
    pub v0: Vec<f64>,
}

impl InitParamFile {
    /// Convert into the engine's parameter struct.
    pub fn into_params(self) -> InitParams {
        InitParams {
            name: self.name,
            seed: self.seed,
            members: self.members,
            state_dim: self.k,
            mean: self.x0,
            variance: self.v0,
        }
    }
}

/// `predict` parameter file. `Q` is optional; absent means a zero
/// noise vector.
#[derive(Clone, Debug, Deserialize)]
pub struct PredictParamFile {
    /// Experiment name.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// State dimension.
    pub k: usize,
    /// Process-noise covariance as a flat vector (length `k` or `k²`).
    #[serde(rename = "Q", default)]
    pub q: Vec<f64>,
}

impl PredictParamFile {
    /// Parse `Q` and convert into the engine's parameter struct.
    ///
    /// # Errors
    ///
    /// [`MathError::NoiseShape`] when `Q` has a length other than 0,
    /// `k`, or `k²`.
    pub fn into_params(self) -> Result<PredictParams, MathError> {
        let process_noise = NoiseModel::parse("Q", &self.q, self.k)?;
        Ok(PredictParams {
            name: self.name,
            seed: self.seed,
            state_dim: self.k,
            process_noise,
        })
    }
}

/// `obsgen` parameter file. The seed is part of the uniform schema but
/// unused; the truth trajectory is noise-free.
#[derive(Clone, Debug, Deserialize)]
pub struct ObsgenParamFile {
    /// Experiment name.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Number of forward steps.
    pub t: usize,
    /// State dimension.
    pub k: usize,
    /// Observation dimension.
    pub l: usize,
    /// True initial state, length `k`.
    pub x0: Vec<f64>,
    /// Observation operator as a flat vector (length `l·k`); absent
    /// means the identity.
    #[serde(rename = "H", default)]
    pub h: Vec<f64>,
}

impl ObsgenParamFile {
    /// Parse `H` and convert into the engine's parameter struct.
    ///
    /// # Errors
    ///
    /// [`MathError::OperatorShape`] when `H` has a length other than 0
    /// or `l·k`.
    pub fn into_params(self) -> Result<ObsgenParams, MathError> {
        let operator = ObservationOperator::parse(&self.h, self.l, self.k)?;
        Ok(ObsgenParams {
            name: self.name,
            steps: self.t,
            state_dim: self.k,
            obs_dim: self.l,
            truth: self.x0,
            operator,
        })
    }
}

/// `filter` parameter file. `R` and `H` are optional.
#[derive(Clone, Debug, Deserialize)]
pub struct FilterParamFile {
    /// Experiment name.
    pub name: String,
    /// Base seed of the run.
    pub seed: u64,
    /// Ensemble size.
    #[serde(rename = "N")]
    pub members: usize,
    /// State dimension.
    pub k: usize,
    /// Observation dimension.
    pub l: usize,
    /// Observation-noise covariance as a flat vector (length `l` or
    /// `l²`); absent means zero.
    #[serde(rename = "R", default)]
    pub r: Vec<f64>,
    /// Observation operator as a flat vector (length `l·k`); absent
    /// means the identity.
    #[serde(rename = "H", default)]
    pub h: Vec<f64>,
}

impl FilterParamFile {
    /// Parse `R` and `H` and convert into the engine's parameter struct.
    ///
    /// # Errors
    ///
    /// [`MathError::NoiseShape`] or [`MathError::OperatorShape`] for
    /// flat vectors of the wrong length.
    pub fn into_params(self) -> Result<AnalysisParams, MathError> {
        let obs_noise = NoiseModel::parse("R", &self.r, self.l)?;
        let operator = ObservationOperator::parse(&self.h, self.l, self.k)?;
        Ok(AnalysisParams {
            name: self.name,
            seed: self.seed,
            members: self.members,
            state_dim: self.k,
            obs_dim: self.l,
            obs_noise,
            operator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn init_schema_uses_the_conventional_names() {
        let text = r#"{
            "name": "lorenz",
            "seed": 42,
            "N": 16,
            "k": 3,
            "x0": [1.0, 2.0, 3.0],
            "V0": [0.1, 0.1, 0.1]
        }"#;
        let file: InitParamFile = serde_json::from_str(text).unwrap();
        let params = file.into_params();
        assert_eq!(params.members, 16);
        assert_eq!(params.variance, vec![0.1, 0.1, 0.1]);
    }

    #[test]
    fn predict_q_is_optional() {
        let text = r#"{"name": "lorenz", "seed": 1, "k": 2}"#;
        let file: PredictParamFile = serde_json::from_str(text).unwrap();
        let params = file.into_params().unwrap();
        assert!(params.process_noise.is_absent());
    }

    #[test]
    fn predict_q_of_wrong_length_is_rejected() {
        let text = r#"{"name": "lorenz", "seed": 1, "k": 2, "Q": [1.0, 2.0, 3.0]}"#;
        let file: PredictParamFile = serde_json::from_str(text).unwrap();
        assert!(matches!(
            file.into_params().unwrap_err(),
            MathError::NoiseShape { what: "Q", .. }
        ));
    }

    #[test]
    fn filter_r_dispatches_diagonal_and_full() {
        let diag = r#"{"name": "a", "seed": 0, "N": 4, "k": 3, "l": 2, "R": [1.0, 2.0]}"#;
        let file: FilterParamFile = serde_json::from_str(diag).unwrap();
        assert!(matches!(
            file.into_params().unwrap().obs_noise,
            NoiseModel::Diagonal(_)
        ));

        let full = r#"{"name": "a", "seed": 0, "N": 4, "k": 3, "l": 2,
                       "R": [1.0, 0.0, 0.0, 2.0]}"#;
        let file: FilterParamFile = serde_json::from_str(full).unwrap();
        assert!(matches!(
            file.into_params().unwrap().obs_noise,
            NoiseModel::Full(_)
        ));
    }

    #[test]
    fn obsgen_h_defaults_to_identity() {
        let text = r#"{"name": "twin", "seed": 3, "t": 10, "k": 3, "l": 2,
                       "x0": [0.0, 0.0, 0.0]}"#;
        let file: ObsgenParamFile = serde_json::from_str(text).unwrap();
        let params = file.into_params().unwrap();
        assert_eq!(params.operator, ObservationOperator::Identity);
        assert_eq!(params.steps, 10);
    }

    #[test]
    fn missing_required_fields_fail_deserialization() {
        let text = r#"{"name": "lorenz", "seed": 1}"#;
        assert!(serde_json::from_str::<InitParamFile>(text).is_err());
    }

    #[test]
    fn params_merge_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.json");
        let seed = dir.path().join("seed.json");
        fs::write(
            &base,
            r#"{"name": "demo", "seed": 0, "N": 2, "k": 1, "x0": [0.0], "V0": [1.0]}"#,
        )
        .unwrap();
        fs::write(&seed, r#"{"seed": 99}"#).unwrap();

        let file: InitParamFile = load_params(&[
            base.to_str().unwrap().to_owned(),
            seed.to_str().unwrap().to_owned(),
        ])
        .unwrap();
        assert_eq!(file.seed, 99);
        assert_eq!(file.name, "demo");
    }

    #[test]
    fn schema_mismatch_is_an_invalid_params_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, r#"{"name": "demo"}"#).unwrap();
        let err =
            load_params::<InitParamFile>(&[path.to_str().unwrap().to_owned()]).unwrap_err();
        assert!(matches!(err, IoError::InvalidParams { .. }));
    }
}
