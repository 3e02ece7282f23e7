//! Random source used by the simulation
//!
//! Star placement, enemy fire timing, shooter choice, power-up drops and
//! particle spread all draw from a `RandomSource`. Production code uses a
//! seeded `Pcg32`; tests script exact sequences with `ScriptedRandom`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform index into a collection of `len` items (`len` must be > 0)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniform value in `[min, min + range)`
    fn range(&mut self, min: f32, range: f32) -> f32 {
        min + self.next_f32() * range
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded production RNG
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of values, wrapping around at the end
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_wraps() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f32(), 0.1);
        assert_eq!(rng.next_f32(), 0.9);
        assert_eq!(rng.next_f32(), 0.1);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(rng.index(5), 0);
        assert_eq!(rng.index(5), 2);
        assert_eq!(rng.index(5), 4);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..16 {
            let x = a.next_f32();
            assert_eq!(x, b.next_f32());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
