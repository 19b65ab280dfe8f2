//! Random source for spawn decisions
//!
//! Spawning only ever needs "pick one of n", so that is the whole interface.
//! Runs use a seeded `Pcg32`; tests can script the exact sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl RandomSource for Pcg32 {
    fn pick(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of picks, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }

    /// Always picks index 0
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, bound: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..100 {
            assert_eq!(a.pick(6), b.pick(6));
        }
    }

    #[test]
    fn test_seeded_stays_in_bounds() {
        let mut rng = seeded(7);
        for _ in 0..1000 {
            assert!(rng.pick(3) < 3);
        }
    }

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut rng = ScriptedRandom::new(vec![1, 4]);
        assert_eq!(rng.pick(3), 1);
        assert_eq!(rng.pick(3), 1); // 4 % 3
        assert_eq!(rng.pick(6), 1);
        assert_eq!(rng.pick(6), 4);
    }
}
