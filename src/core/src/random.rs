use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Injectable source for every non-deterministic choice the engine makes
/// (housecleaning coin flip, public statement template).
pub trait RandomSource {
    /// Returns true with the given probability (clamped to [0, 1]).
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }

        self.rng.random_range(0..len)
    }
}

/// Pinned outcomes for tests.
#[cfg(test)]
pub(crate) struct FixedRandom {
    pub chance: bool,
    pub index: usize,
    pub chance_calls: usize,
}

#[cfg(test)]
impl FixedRandom {
    pub fn new(chance: bool, index: usize) -> Self {
        FixedRandom {
            chance,
            index,
            chance_calls: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chance_calls += 1;
        self.chance
    }

    fn pick(&mut self, len: usize) -> usize {
        self.index % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut first = SeededRandom::new(42);
        let mut second = SeededRandom::new(42);

        let a: Vec<usize> = (0..20).map(|_| first.pick(10)).collect();
        let b: Vec<usize> = (0..20).map(|_| second.pick(10)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|i| *i < 10));
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SeededRandom::new(7);

        assert!((0..50).all(|_| rng.chance(1.0)));
        assert!((0..50).all(|_| !rng.chance(0.0)));
        assert!(!rng.chance(-3.0));
    }

    #[test]
    fn test_pick_single_element() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.pick(1), 0);
        assert_eq!(rng.pick(0), 0);
    }
}
