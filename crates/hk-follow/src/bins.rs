//! The degree-stratified bin index `B`/`W`.
//!
//! Bins bucket agents by current follower count so the `twitter_suggest`
//! model can draw a preferential follower without an O(n) scan: pick a bin
//! weighted by `W[k] * |B[k]|`, then pick uniformly within it.
//!
//! Grounded on `twitter_follow_st.hpp::init_bins`/`update_bins`: the
//! increment is squared `bin_spacing - 1` times before bin boundaries are
//! laid out, and each bin's weight is `(min + k*increment) ^ exponent`,
//! normalized to sum to 1.

use hk_core::AgentId;
use rustc_hash::FxHashSet;

pub struct BinIndex {
    bins: Vec<FxHashSet<AgentId>>,
    weights: Vec<f64>,
    /// Reverse map agent -> current bin index. Deriving the *previous* bin
    /// from `followers_size - 1` at move time is ambiguous right at a bin
    /// boundary; this is O(1) and exact instead.
    agent_bin: Vec<usize>,
    kmax: usize,
    max_agents: u32,
}

impl BinIndex {
    pub fn build(spacing: f64, min: f64, max: f64, mut increment: f64, exponent: f64, max_agents: u32) -> Self {
        let squarings = (spacing as u64).saturating_sub(1);
        for _ in 0..squarings {
            increment *= increment;
        }
        let k = if increment > 0.0 {
            (((max - min) / increment).floor() as usize) + 1
        } else {
            1
        };

        let mut weights = Vec::with_capacity(k);
        let mut total = 0.0;
        for i in 0..k {
            let v = (min + i as f64 * increment).max(0.0).powf(exponent);
            weights.push(v);
            total += v;
        }
        if total > 0.0 {
            for w in &mut weights {
                *w /= total;
            }
        }

        Self {
            bins: vec![FxHashSet::default(); k],
            weights,
            agent_bin: Vec::new(),
            kmax: 0,
            max_agents,
        }
    }

    pub fn k(&self) -> usize {
        self.bins.len()
    }

    pub fn kmax(&self) -> usize {
        self.kmax
    }

    pub fn bin(&self, idx: usize) -> &FxHashSet<AgentId> {
        &self.bins[idx]
    }

    pub fn weight(&self, idx: usize) -> f64 {
        self.weights[idx]
    }

    pub fn total_agents(&self) -> usize {
        self.bins.iter().map(|b| b.len()).sum()
    }

    /// Insert a freshly grown agent into bin 0 (zero followers).
    pub fn insert_new(&mut self, id: AgentId) {
        debug_assert_eq!(id.index(), self.agent_bin.len(), "agents must be inserted in id order");
        self.bins[0].insert(id);
        self.agent_bin.push(0);
    }

    /// `followee` just gained a follower, bringing its follower count to
    /// `new_followers_size`. Move it to the bin that count maps to.
    pub fn move_agent(&mut self, followee: AgentId, new_followers_size: u32) {
        let k = self.bins.len() as u32;
        let raw = (new_followers_size as u64 * k as u64) / self.max_agents.max(1) as u64;
        let new_idx = (raw as usize).min(self.bins.len() - 1);

        let old_idx = self.agent_bin[followee.index()];
        if old_idx != new_idx {
            assert!(
                self.bins[old_idx].remove(&followee),
                "followee missing from its own bin — bin index bookkeeping is broken"
            );
            self.bins[new_idx].insert(followee);
            self.agent_bin[followee.index()] = new_idx;
        }
        if new_idx > self.kmax {
            self.kmax = new_idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_core::AgentId;

    #[test]
    fn weights_normalize_to_one() {
        let bins = BinIndex::build(1.0, 1.0, 11.0, 1.0, 1.0, 100);
        let total: f64 = (0..bins.k()).map(|i| bins.weight(i)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn new_agents_land_in_bin_zero() {
        let mut bins = BinIndex::build(1.0, 1.0, 11.0, 1.0, 1.0, 100);
        let a = AgentId(0);
        bins.insert_new(a);
        assert!(bins.bin(0).contains(&a));
    }

    #[test]
    fn move_agent_tracks_kmax_and_removes_from_old_bin() {
        let mut bins = BinIndex::build(1.0, 0.0, 10.0, 1.0, 1.0, 10);
        let a = AgentId(0);
        bins.insert_new(a);
        bins.move_agent(a, 5);
        assert!(!bins.bin(0).contains(&a));
        assert!(bins.kmax() > 0);
    }
}
