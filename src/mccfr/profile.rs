use super::discount::Discount;
use super::edge::Edge;
use super::policy::PolicyEntry;
use crate::Probability;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// the tabular regret-matching policy store: one [`PolicyEntry`] per
/// info-set key (the history bytes up to and including that node). entries
/// are created lazily on first visit and only the keys touched in the
/// current iteration are discounted on `update()`, since the discount
/// schedule is idempotent off-period and commutative across keys.
pub struct Profile {
    entries: HashMap<Vec<u8>, PolicyEntry>,
    dirty: HashSet<Vec<u8>>,
    discount: &'static Discount,
    t: usize,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            dirty: HashSet::new(),
            discount: Discount::default(),
            t: 0,
        }
    }

    pub fn iteration(&self) -> usize {
        self.t
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// returns the entry for `key`, constructing it uniformly over `edges`
    /// on first visit. never blindly indexes a missing key.
    pub fn entry_or_uniform(&mut self, key: &[u8], edges: Vec<Edge>) -> &mut PolicyEntry {
        self.entries
            .entry(key.to_vec())
            .or_insert_with(|| PolicyEntry::uniform(edges))
    }

    /// overwrites the strategy for `key` with `strat`, creating a uniform
    /// entry first if this is the first visit. used to seed opponent
    /// strategies from the opponent-strategy prior prior to training.
    pub fn set_strategy(&mut self, key: &[u8], edges: Vec<Edge>, strat: &[Probability]) {
        let entry = self.entries.entry(key.to_vec()).or_insert_with(|| PolicyEntry::uniform(edges));
        entry.set_strategy(strat);
    }

    pub fn strategy_at(&self, key: &[u8]) -> Option<&[f32]> {
        self.entries.get(key).map(PolicyEntry::strategy)
    }

    pub fn average_strategy_at(&self, key: &[u8]) -> Option<Vec<f32>> {
        self.entries.get(key).map(PolicyEntry::average_strategy)
    }

    pub fn add_regret(&mut self, key: &[u8], index: usize, regret: Probability) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.add_regret(index, regret);
            self.dirty.insert(key.to_vec());
        }
    }

    pub fn add_strategy_weight(&mut self, key: &[u8], index: usize, weight: Probability) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.add_strategy_weight(index, weight);
            self.dirty.insert(key.to_vec());
        }
    }

    /// advances the training clock and applies the discount schedule to
    /// every entry touched since the previous call, then recomputes each
    /// touched entry's strategy by regret matching.
    pub fn update(&mut self) {
        self.t += 1;
        let t = self.t;
        let policy_discount = self.discount.policy(t);
        for key in self.dirty.drain() {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.apply_discount(policy_discount, |r| self.discount.regret(t, r));
                entry.recompute_strategy();
            }
        }
        log::trace!("profile update t={t} entries={}", self.entries.len());
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        log::info!("saving profile with {} entries", self.entries.len());
        crate::persistence::save(&self.entries, path)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let entries = crate::persistence::load(path)?;
        log::info!("loaded profile with {} entries", entries.len());
        Ok(Self {
            entries,
            dirty: HashSet::new(),
            discount: Discount::default(),
            t: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_created_lazily() {
        let mut profile = Profile::new();
        assert!(profile.is_empty());
        profile.entry_or_uniform(b"9Kc", Edge::AI.to_vec());
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn update_advances_iteration_monotonically() {
        let mut profile = Profile::new();
        profile.entry_or_uniform(b"9Kc", Edge::AI.to_vec());
        profile.add_regret(b"9Kc", 0, 1.0);
        profile.update();
        assert_eq!(profile.iteration(), 1);
        profile.add_regret(b"9Kc", 0, 1.0);
        profile.update();
        assert_eq!(profile.iteration(), 2);
    }

    #[test]
    fn untouched_entries_are_not_dirtied() {
        let mut profile = Profile::new();
        profile.entry_or_uniform(b"9Kc", Edge::AI.to_vec());
        profile.entry_or_uniform(b"9Kr", Edge::AI.to_vec());
        profile.add_regret(b"9Kc", Edge::Raise.index(), 5.0);
        profile.update();
        let touched = profile.strategy_at(b"9Kc").unwrap();
        let untouched = profile.strategy_at(b"9Kr").unwrap();
        assert!(touched[Edge::Raise.index()] > 0.9);
        assert!((untouched[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn set_strategy_seeds_a_fresh_entry() {
        let mut profile = Profile::new();
        profile.set_strategy(b"9Kc", Edge::AI.to_vec(), &[0.4, 0.4, 0.1, 0.1]);
        assert_eq!(profile.strategy_at(b"9Kc").unwrap(), &[0.4, 0.4, 0.1, 0.1]);
    }
}
