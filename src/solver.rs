//! top-level embedding API: train a policy, persist it, and consult it at
//! runtime for a single decision.

use crate::decision::{append_action_byte, decide, maintain_history, Action, Table};
use crate::mccfr::{Engine, Profile};
use crate::Chips;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;

/// which opponent-strategy prior phase to seed fresh opponent-bucket nodes
/// with; re-exported here so callers embedding this solver don't need to
/// reach into `tables` directly.
pub use crate::tables::OpponentType;

pub struct Solver {
    engine: Engine<SmallRng>,
}

impl Solver {
    pub fn init(opponent_type: OpponentType, seed: u64) -> Self {
        let profile = Profile::new();
        let rng = SmallRng::seed_from_u64(seed);
        Self {
            engine: Engine::new(profile, rng, opponent_type),
        }
    }

    pub fn run(&mut self, iterations: usize, remaining_opponents: u8) {
        log::info!("running {iterations} training iterations");
        self.engine.train(iterations, remaining_opponents);
    }

    /// maintains the round/history bookkeeping, looks up the trained
    /// average strategy at the resulting info-set key, runs it through the
    /// runtime re-weighting cascade, sizes the chosen action's bet, and
    /// appends the action byte to the history before returning it.
    pub fn get_decision(&self, history: &[u8], table: &mut Table, seed: u64) -> (Action, Chips, Vec<u8>) {
        let mut history = history.to_vec();
        maintain_history(&mut history, table);
        let mut strategy = self
            .engine
            .profile()
            .average_strategy_at(&history)
            .map(|s| [s[0], s[1], s[2], s[3]])
            .unwrap_or([0.25, 0.25, 0.25, 0.25]);
        let mut rng = SmallRng::seed_from_u64(seed);
        let (action, bet) = decide(&mut strategy, table, &mut rng);
        append_action_byte(&mut history, action);
        (action, bet, history)
    }

    pub fn get_expectation(&self, history: &[u8]) -> Option<Vec<f32>> {
        self.engine.profile().average_strategy_at(history)
    }

    pub fn info_set_count(&self) -> usize {
        self.engine.profile().len()
    }

    pub fn save_policy(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.engine.profile().save(path)
    }

    pub fn load_policy(path: impl AsRef<Path>, opponent_type: OpponentType, seed: u64) -> anyhow::Result<Self> {
        let profile = Profile::load(path)?;
        let rng = SmallRng::seed_from_u64(seed);
        Ok(Self {
            engine: Engine::new(profile, rng, opponent_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_run_populates_entries() {
        let mut solver = Solver::init(OpponentType::Neutral, 0);
        solver.run(20, 6);
        assert!(solver.info_set_count() > 0);
    }
}
