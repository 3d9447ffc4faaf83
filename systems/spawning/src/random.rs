//! Seedable bounded random draws used for tile placement.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random source backing tile placement and value selection.
#[derive(Clone, Debug)]
pub struct TileRng {
    rng: ChaCha8Rng,
}

impl TileRng {
    /// Creates a reproducible source from the provided seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Draws an integer uniformly from `[0, bound)`.
    ///
    /// Returns `None` when `bound` is zero.
    pub fn random_int(&mut self, bound: usize) -> Option<usize> {
        if bound == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..bound))
    }

    /// Picks an element of `items` uniformly, or `None` when it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.random_int(items.len())
            .and_then(|index| items.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_int_stays_below_bound() {
        let mut rng = TileRng::from_seed(0x5eed);
        for limit in 1..=16 {
            for _ in 0..64 {
                let drawn = rng.random_int(limit).expect("non-zero bound");
                assert!(drawn < limit, "{drawn} escaped [0, {limit})");
            }
        }
    }

    #[test]
    fn zero_bound_yields_nothing() {
        let mut rng = TileRng::from_entropy();
        assert_eq!(rng.random_int(0), None);
        assert_eq!(rng.pick::<u32>(&[]), None);
    }

    #[test]
    fn equal_seeds_replay_identically() {
        let mut first = TileRng::from_seed(7);
        let mut second = TileRng::from_seed(7);
        let first_draws: Vec<_> = (0..32).map(|_| first.random_int(1_000)).collect();
        let second_draws: Vec<_> = (0..32).map(|_| second.random_int(1_000)).collect();
        assert_eq!(first_draws, second_draws);
    }

    #[test]
    fn every_candidate_is_reachable() {
        let mut rng = TileRng::from_seed(11);
        let mut seen = [false; 4];
        for _ in 0..256 {
            if let Some(index) = rng.random_int(seen.len()) {
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
