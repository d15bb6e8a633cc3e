use super::edge::Edge;
use crate::Probability;

/// one information set's accumulated regret and strategy sums, plus the
/// current strategy derived from them by regret matching. width is fixed at
/// construction (4 for AI action nodes, 4 or 5 for opponent-bucket nodes).
#[derive(Debug, Clone)]
pub struct PolicyEntry {
    edges: Vec<Edge>,
    regret_sum: Vec<f32>,
    strategy_sum: Vec<f32>,
    strategy: Vec<f32>,
}

impl PolicyEntry {
    pub fn uniform(edges: Vec<Edge>) -> Self {
        let width = edges.len();
        let strategy = vec![1.0 / width as f32; width];
        Self {
            edges,
            regret_sum: vec![0.0; width],
            strategy_sum: vec![0.0; width],
            strategy,
        }
    }

    /// overwrites the current strategy with a renormalized prior, falling
    /// back to uniform when the prior sums to zero. used to seed opponent
    /// strategies from the opponent-strategy prior before training visits
    /// the entry for the first time.
    pub fn set_strategy(&mut self, strat: &[Probability]) {
        assert_eq!(self.edges.len(), strat.len(), "prior width must match edge count");
        let total: f32 = strat.iter().sum();
        self.strategy = if total > 0.0 {
            strat.iter().map(|p| p / total).collect()
        } else {
            vec![1.0 / self.width() as f32; self.width()]
        };
    }

    /// reconstructs an entry from its raw accumulators, as read back from
    /// the persisted policy format. recomputes the current strategy by
    /// regret matching rather than persisting it redundantly.
    pub fn from_raw(edges: Vec<Edge>, regret_sum: Vec<f32>, strategy_sum: Vec<f32>) -> Self {
        let width = edges.len();
        let mut entry = Self {
            edges,
            regret_sum,
            strategy_sum,
            strategy: vec![1.0 / width as f32; width],
        };
        entry.recompute_strategy();
        entry
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn regret_sum(&self) -> &[f32] {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &[f32] {
        &self.strategy_sum
    }

    pub fn strategy(&self) -> &[f32] {
        &self.strategy
    }

    pub fn width(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, edge: Edge) -> Option<usize> {
        self.edges.iter().position(|e| *e == edge)
    }

    pub fn add_regret(&mut self, index: usize, regret: Probability) {
        self.regret_sum[index] += regret;
        log::trace!("regret[{index}] += {regret} -> {}", self.regret_sum[index]);
    }

    pub fn add_strategy_weight(&mut self, index: usize, weight: Probability) {
        self.strategy_sum[index] += weight;
    }

    /// regret-matching: the next strategy is proportional to positive
    /// regret, falling back to uniform when all regret is non-positive.
    pub fn recompute_strategy(&mut self) {
        let positive: Vec<f32> = self.regret_sum.iter().map(|r| r.max(0.0)).collect();
        let total: f32 = positive.iter().sum();
        self.strategy = if total > 0.0 {
            positive.iter().map(|r| r / total).collect()
        } else {
            vec![1.0 / self.width() as f32; self.width()]
        };
    }

    /// the time-averaged strategy used at serving time, normalized from the
    /// strategy-sum accumulator.
    pub fn average_strategy(&self) -> Vec<f32> {
        let total: f32 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|s| s / total).collect()
        } else {
            vec![1.0 / self.width() as f32; self.width()]
        }
    }

    pub fn apply_discount(&mut self, policy_discount: f32, regret_discount: impl Fn(f32) -> f32) {
        for s in self.strategy_sum.iter_mut() {
            *s *= policy_discount;
        }
        for r in self.regret_sum.iter_mut() {
            *r *= regret_discount(*r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_entry_sums_to_one() {
        let entry = PolicyEntry::uniform(Edge::AI.to_vec());
        let total: f32 = entry.strategy().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn regret_matching_favors_positive_regret() {
        let mut entry = PolicyEntry::uniform(Edge::AI.to_vec());
        entry.add_regret(Edge::Raise.index(), 10.0);
        entry.recompute_strategy();
        assert!(entry.strategy()[Edge::Raise.index()] > 0.9);
    }

    #[test]
    fn all_nonpositive_regret_falls_back_to_uniform() {
        let mut entry = PolicyEntry::uniform(Edge::AI.to_vec());
        entry.add_regret(Edge::Fold.index(), -5.0);
        entry.recompute_strategy();
        let total: f32 = entry.strategy().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!((entry.strategy()[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn set_strategy_overwrites_and_renormalizes() {
        let mut entry = PolicyEntry::uniform(Edge::AI.to_vec());
        entry.set_strategy(&[0.4, 0.4, 0.1, 0.1]);
        assert_eq!(entry.strategy(), &[0.4, 0.4, 0.1, 0.1]);
        entry.set_strategy(&[2.0, 2.0, 0.5, 0.5]);
        assert_eq!(entry.strategy(), &[0.4, 0.4, 0.1, 0.1]);
    }

    #[test]
    fn set_strategy_falls_back_to_uniform_on_zero_sum() {
        let mut entry = PolicyEntry::uniform(Edge::AI.to_vec());
        entry.set_strategy(&[0.0, 0.0, 0.0, 0.0]);
        let total: f32 = entry.strategy().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
