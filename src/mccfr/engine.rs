use super::edge::Edge;
use super::node::{GameNode, Player};
use super::profile::Profile;
use super::sampler::Sampler;
use crate::tables::OpponentType;
use crate::Utility;
use rand::Rng;
use std::collections::HashMap;

/// per-info-set cache of the single action sampled for a non-traversing
/// node this iteration, so a second visit to the same info set along the
/// same trajectory reuses it instead of resampling.
type SampledActions = HashMap<Vec<u8>, Edge>;

/// external-sampling MCCFR traversal driver: at the traversing player's own
/// nodes every action is explored and regret is accumulated from the
/// difference against the node's mixed value; at every other node a single
/// action is sampled from the current strategy and the walk continues down
/// one path only.
pub struct Engine<R> {
    profile: Profile,
    sampler: Sampler,
    rng: R,
    opponent_type: OpponentType,
}

impl<R: Rng> Engine<R> {
    pub fn new(profile: Profile, rng: R, opponent_type: OpponentType) -> Self {
        Self {
            profile,
            sampler: Sampler::default(),
            rng,
            opponent_type,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }

    /// runs one iteration per role (AI, then opponent), alternating which
    /// side accumulates regret, and advances the discount schedule once
    /// per role after both walks.
    pub fn iterate(&mut self, remaining_opponents: u8) {
        for traverser in [Player::Ai, Player::Opponent] {
            let root = GameNode::root(remaining_opponents);
            let mut sampled = SampledActions::new();
            let mut raise_confidences = Vec::new();
            self.traverse(&root, traverser, &mut sampled, &mut raise_confidences);
        }
        self.profile.update();
    }

    pub fn train(&mut self, iterations: usize, remaining_opponents: u8) {
        for i in 0..iterations {
            self.iterate(remaining_opponents);
            if i % 10_000 == 0 {
                log::info!("iteration {i}: {} info sets", self.profile.len());
            }
        }
    }

    fn traverse(
        &mut self,
        node: &GameNode,
        traverser: Player,
        sampled: &mut SampledActions,
        raise_confidences: &mut Vec<f32>,
    ) -> Utility {
        if node.is_terminal() {
            return node.utility(raise_confidences, &mut self.rng);
        }
        match node.player() {
            Player::Chance => self.handle_chance_node(node, traverser, sampled, raise_confidences),
            player if player == traverser => {
                self.handle_traversing_player_node(node, traverser, sampled, raise_confidences)
            }
            _ => self.handle_sampled_player_node(node, traverser, sampled, raise_confidences),
        }
    }

    fn handle_chance_node(
        &mut self,
        node: &GameNode,
        traverser: Player,
        sampled: &mut SampledActions,
        raise_confidences: &mut Vec<f32>,
    ) -> Utility {
        let children = node.chance_children();
        let roll: f32 = self.rng.gen();
        let mut acc = 0.0;
        let mut choice = children.last().map(|(c, _)| c.clone()).expect("chance node always has children");
        for (child, p) in &children {
            acc += p;
            if roll <= acc {
                choice = child.clone();
                break;
            }
        }
        self.traverse(&choice, traverser, sampled, raise_confidences)
    }

    fn handle_traversing_player_node(
        &mut self,
        node: &GameNode,
        traverser: Player,
        sampled: &mut SampledActions,
        raise_confidences: &mut Vec<f32>,
    ) -> Utility {
        let key = node.history().to_vec();
        let edges = node.policy_edges();
        self.ensure_entry(node, &key, &edges);
        let strategy = self.profile.strategy_at(&key).expect("just inserted").to_vec();

        let mut values = vec![0.0; edges.len()];
        for (i, edge) in edges.iter().enumerate() {
            let child = node.apply(*edge);
            // a fresh sampled-action cache per sibling branch: the other
            // branches are hypothetical and must not leak a shared opponent
            // sample into this one.
            let mut scoped = SampledActions::new();
            let mut confidences = raise_confidences.clone();
            if matches!(edge, Edge::Raise) {
                confidences.push(strategy[Edge::Raise.index()]);
            }
            values[i] = self.traverse(&child, traverser, &mut scoped, &mut confidences);
        }
        let node_value: Utility = strategy.iter().zip(values.iter()).map(|(p, v)| p * v).sum();

        for (i, _) in edges.iter().enumerate() {
            self.profile.add_regret(&key, i, values[i] - node_value);
            self.profile.add_strategy_weight(&key, i, strategy[i]);
        }
        let _ = sampled;
        node_value
    }

    fn handle_sampled_player_node(
        &mut self,
        node: &GameNode,
        traverser: Player,
        sampled: &mut SampledActions,
        raise_confidences: &mut Vec<f32>,
    ) -> Utility {
        let key = node.history().to_vec();
        let edges = node.policy_edges();
        self.ensure_entry(node, &key, &edges);
        let strategy = self.profile.strategy_at(&key).expect("just inserted").to_vec();

        let chosen_index = if let Some(cached) = sampled.get(&key) {
            edges.iter().position(|e| e == cached).unwrap_or(0)
        } else {
            let index = self.sampler.sample(&strategy, &mut self.rng);
            sampled.insert(key.clone(), edges[index]);
            index
        };
        self.profile.add_strategy_weight(&key, chosen_index, strategy[chosen_index]);

        let child = node.apply(edges[chosen_index]);
        self.traverse(&child, traverser, sampled, raise_confidences)
    }

    fn ensure_entry(&mut self, node: &GameNode, key: &[u8], edges: &[Edge]) {
        if self.profile.strategy_at(key).is_some() {
            return;
        }
        self.profile.entry_or_uniform(key, edges.to_vec());
        if node.player() == Player::Opponent {
            let prior = node.opponent_prior(self.opponent_type);
            self.profile.set_strategy(key, edges.to_vec(), &prior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn a_single_iteration_populates_the_profile() {
        let profile = Profile::new();
        let rng = rand::rngs::SmallRng::seed_from_u64(42);
        let mut engine = Engine::new(profile, rng, OpponentType::Neutral);
        engine.iterate(6);
        assert!(engine.profile().len() > 0);
    }

    #[test]
    fn training_does_not_panic_over_many_iterations() {
        let profile = Profile::new();
        let rng = rand::rngs::SmallRng::seed_from_u64(1);
        let mut engine = Engine::new(profile, rng, OpponentType::Neutral);
        engine.train(50, 6);
        assert!(engine.profile().len() > 0);
    }
}
