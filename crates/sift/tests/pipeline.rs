//! End-to-end assimilation cycle through the on-disk record formats.
//!
//! Runs a small twin experiment: generate observations from a known
//! truth, initialize an ensemble elsewhere, then alternate forecast and
//! analysis steps reading and writing JSON records the whole way, as
//! the command-line tools do.

use std::path::{Path, PathBuf};

use sift::io::{
    expand_sequence, obs_filename, read_record, state_filename,
    state_filename_with_id_placeholder, write_record,
};
use sift::prelude::*;
use sift_test_utils::ShiftModel;

const NAME: &str = "twin";
const SEED: u64 = 1234;
const MEMBERS: usize = 8;
const STATE_DIM: usize = 2;

fn write_states(dir: &Path, ensemble: &Ensemble) -> Vec<PathBuf> {
    ensemble
        .members()
        .iter()
        .map(|m| {
            let path = dir.join(state_filename(m));
            write_record(&path, m, false).unwrap();
            path
        })
        .collect()
}

fn read_ensemble(dir: &Path, pattern: &str) -> Ensemble {
    let files = expand_sequence(dir.join(pattern).to_str().unwrap()).unwrap();
    let members = files
        .iter()
        .map(|p| read_record::<State>(p).unwrap())
        .collect();
    Ensemble::from_members(members).unwrap()
}

#[test]
fn twin_experiment_converges_toward_the_truth() {
    let dir = tempfile::tempdir().unwrap();

    // Truth drifts by +1 per component per step; observe it directly.
    let obsgen = ObsgenParams {
        name: NAME.into(),
        steps: 4,
        state_dim: STATE_DIM,
        obs_dim: STATE_DIM,
        truth: vec![10.0, -10.0],
        operator: ObservationOperator::Identity,
    };
    let mut truth_model = ShiftModel::new(1.0);
    let observations = sift::engine::obsgen::generate(&obsgen, &mut truth_model).unwrap();
    for obs in &observations {
        write_record(&dir.path().join(obs_filename(obs)), obs, false).unwrap();
    }

    // The ensemble starts far from the truth, with the same dynamics.
    let init = InitParams {
        name: NAME.into(),
        seed: SEED,
        members: MEMBERS,
        state_dim: STATE_DIM,
        mean: vec![0.0, 0.0],
        variance: vec![4.0, 4.0],
    };
    let ensemble = sift::engine::init::draw(&init).unwrap();
    write_states(dir.path(), &ensemble);

    let predict = PredictParams {
        name: NAME.into(),
        seed: SEED,
        state_dim: STATE_DIM,
        process_noise: NoiseModel::parse("Q", &[0.01, 0.01], STATE_DIM).unwrap(),
    };
    let analysis = AnalysisParams {
        name: NAME.into(),
        seed: SEED,
        members: MEMBERS,
        state_dim: STATE_DIM,
        obs_dim: STATE_DIM,
        obs_noise: NoiseModel::parse("R", &[0.1, 0.1], STATE_DIM).unwrap(),
        operator: ObservationOperator::Identity,
    };

    // Cycle: forecast every member, then assimilate the observation at
    // the new time, always through files.
    for cycle in 0..4i64 {
        let forecast_pattern =
            format!("{NAME}_%04d_{:06}_{:06}.json", cycle, cycle);
        let mut ensemble = read_ensemble(dir.path(), &forecast_pattern);

        let mut model = ShiftModel::new(1.0);
        for member in ensemble.members_mut() {
            sift::engine::predict::advance(&predict, member, &mut model).unwrap();
        }
        write_states(dir.path(), &ensemble);

        let obs_path = dir
            .path()
            .join(format!("{NAME}_obs_{:06}.json", cycle + 1));
        let obs: Observation = read_record(&obs_path).unwrap();

        let pattern = state_filename_with_id_placeholder(&ensemble.members()[0]);
        let mut ensemble = read_ensemble(dir.path(), &pattern);
        analyse("enkf", &analysis, &mut ensemble, &obs).unwrap();
        write_states(dir.path(), &ensemble);
    }

    // After four cycles the ensemble mean sits near the truth at t=4.
    let final_ensemble = read_ensemble(dir.path(), &format!("{NAME}_%04d_000004_000004.json"));
    for dim in 0..STATE_DIM {
        let mean: f64 = final_ensemble
            .members()
            .iter()
            .map(|m| m.x[dim])
            .sum::<f64>()
            / MEMBERS as f64;
        let truth = [14.0, -6.0][dim];
        assert!(
            (mean - truth).abs() < 1.0,
            "dim {dim}: ensemble mean {mean} far from truth {truth}"
        );
    }
}

#[test]
fn filter_refuses_an_observation_from_the_wrong_cycle() {
    let init = InitParams {
        name: NAME.into(),
        seed: SEED,
        members: 4,
        state_dim: 1,
        mean: vec![0.0],
        variance: vec![1.0],
    };
    let mut ensemble = sift::engine::init::draw(&init).unwrap();

    // Freshly initialized members have seen no forecast; assimilating
    // the t=1 observation must fail.
    let analysis = AnalysisParams {
        name: NAME.into(),
        seed: SEED,
        members: 4,
        state_dim: 1,
        obs_dim: 1,
        obs_noise: NoiseModel::Absent,
        operator: ObservationOperator::Identity,
    };
    let obs = Observation {
        name: NAME.into(),
        obs_tim: 1,
        y: vec![0.0],
    };
    let err = analyse("enkf", &analysis, &mut ensemble, &obs).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::TimestampMismatch { .. })
    ));
}
