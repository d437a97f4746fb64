//! Deterministic random-stream derivation.
//!
//! Every stochastic operation constructs its generator explicitly from
//! the run's base seed plus whatever distinguishes the invocation; no
//! generator is ever shared through global state. Prediction streams
//! additionally fold in the member id and the current system time so
//! that no two (member, time) calls can reuse a sequence — ensemble
//! decorrelation depends on it.
//!
//! The inputs are packed into the full 32-byte ChaCha key, together
//! with an 8-byte domain tag keeping the initialization, prediction,
//! and analysis families of streams disjoint even for equal numeric
//! inputs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TAG_INIT: &[u8; 8] = b"sift-ini";
const TAG_PREDICT: &[u8; 8] = b"sift-prd";
const TAG_ANALYSIS: &[u8; 8] = b"sift-anl";

fn derive(seed: u64, a: u64, b: u64, tag: &[u8; 8]) -> ChaCha8Rng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&a.to_le_bytes());
    key[16..24].copy_from_slice(&b.to_le_bytes());
    key[24..].copy_from_slice(tag);
    ChaCha8Rng::from_seed(key)
}

/// Stream for drawing one initial ensemble.
pub fn init_stream(seed: u64) -> ChaCha8Rng {
    derive(seed, 0, 0, TAG_INIT)
}

/// Stream for one member's process-noise draw at one system time.
///
/// Distinct `(member_id, sys_tim)` pairs always yield distinct streams,
/// so per-member prediction commands may run in any order (or
/// concurrently as separate processes) and remain reproducible.
pub fn prediction_stream(seed: u64, member_id: i64, sys_tim: i64) -> ChaCha8Rng {
    derive(seed, member_id as u64, sys_tim as u64, TAG_PREDICT)
}

/// Stream for the observation perturbations of one analysis step.
pub fn analysis_stream(seed: u64, obs_tim: i64) -> ChaCha8Rng {
    derive(seed, obs_tim as u64, 0, TAG_ANALYSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn first_words(rng: &mut ChaCha8Rng) -> [u64; 4] {
        [
            rng.next_u64(),
            rng.next_u64(),
            rng.next_u64(),
            rng.next_u64(),
        ]
    }

    #[test]
    fn same_inputs_same_stream() {
        let a = first_words(&mut prediction_stream(42, 3, 7));
        let b = first_words(&mut prediction_stream(42, 3, 7));
        assert_eq!(a, b);
    }

    #[test]
    fn member_and_time_are_not_interchangeable() {
        // Additive seeding (seed + id + tim) would collide here.
        let a = first_words(&mut prediction_stream(42, 1, 2));
        let b = first_words(&mut prediction_stream(42, 2, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn domains_are_disjoint() {
        let init = first_words(&mut init_stream(42));
        let predict = first_words(&mut prediction_stream(42, 0, 0));
        let analysis = first_words(&mut analysis_stream(42, 0));
        assert_ne!(init, predict);
        assert_ne!(init, analysis);
        assert_ne!(predict, analysis);
    }

    #[test]
    fn seed_changes_every_domain() {
        assert_ne!(
            first_words(&mut init_stream(1)),
            first_words(&mut init_stream(2))
        );
        assert_ne!(
            first_words(&mut analysis_stream(1, 5)),
            first_words(&mut analysis_stream(2, 5))
        );
    }
}
