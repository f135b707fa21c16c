//! The engine's single shared RNG.
//!
//! Per spec, RNG state belongs to the engine alone and is passed by
//! reference into whichever action is invoked that step — no action may
//! create an independent RNG of its own, so results stay reproducible from
//! a single seed regardless of which action fires on a given step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform real in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Draw an index into `weights` with probability proportional to its value.
///
/// Returns `None` if every weight is `<= 0` (no candidate can be sampled) —
/// callers treat this as "FAIL", never as a division-by-zero panic. Weights
/// need not be pre-normalized.
pub fn sample_weighted(rng: &mut SimRng, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let mut draw = rng.unit() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if draw < w {
            return Some(i);
        }
        draw -= w;
    }
    // Floating-point rounding can leave a residue; fall back to the last
    // positive-weight candidate rather than returning None spuriously.
    weights.iter().rposition(|&w| w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_weighted_all_zero_returns_none() {
        let mut rng = SimRng::new(1);
        assert_eq!(sample_weighted(&mut rng, &[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn sample_weighted_single_positive_always_picks_it() {
        let mut rng = SimRng::new(1);
        for _ in 0..20 {
            assert_eq!(sample_weighted(&mut rng, &[0.0, 5.0, 0.0]), Some(1));
        }
    }

    #[test]
    fn sample_weighted_stays_in_bounds() {
        let mut rng = SimRng::new(42);
        let weights = [1.0, 2.0, 0.0, 4.0];
        for _ in 0..200 {
            let idx = sample_weighted(&mut rng, &weights).unwrap();
            assert!(idx < weights.len());
            assert!(weights[idx] > 0.0);
        }
    }
}
