//! Deterministic workload scripts for benchmarking the warren containers.
//!
//! Benchmarks should not pay RNG costs inside the measured loop and must be
//! reproducible across runs, so the op mix is pre-generated from a seed via
//! [`churn_script`] and replayed verbatim.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Insert the given value.
    Add(u64),
    /// Remove the live entry whose dense position is `selector % len`.
    RemoveLive {
        /// Position selector, reduced modulo the live count at replay time.
        selector: usize,
    },
}

/// Build a deterministic add/remove script.
///
/// Roughly two inserts per removal, so the container keeps growing while
/// still exercising swap-remove compaction and id reuse. The same seed
/// always yields the same script.
pub fn churn_script(len: usize, seed: u64) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut script = Vec::with_capacity(len);
    let mut live = 0usize;
    for _ in 0..len {
        if live > 0 && rng.random_range(0..3) == 0 {
            script.push(ChurnOp::RemoveLive {
                selector: rng.random_range(0..usize::MAX),
            });
            live -= 1;
        } else {
            script.push(ChurnOp::Add(rng.random::<u64>()));
            live += 1;
        }
    }
    script
}

/// Number of entries left live after replaying `script` from empty.
pub fn final_live_count(script: &[ChurnOp]) -> usize {
    script.iter().fold(0usize, |live, op| match op {
        ChurnOp::Add(_) => live + 1,
        ChurnOp::RemoveLive { .. } => live - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_deterministic() {
        let a = churn_script(1000, 42);
        let b = churn_script(1000, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(churn_script(1000, 1), churn_script(1000, 2));
    }

    #[test]
    fn removals_never_outnumber_inserts() {
        let script = churn_script(5000, 7);
        let mut live = 0i64;
        for op in &script {
            match op {
                ChurnOp::Add(_) => live += 1,
                ChurnOp::RemoveLive { .. } => live -= 1,
            }
            assert!(live >= 0, "script removes from an empty container");
        }
        assert_eq!(live as usize, final_live_count(&script));
    }
}
