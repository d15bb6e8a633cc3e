//! constant probability tables governing chance-node transitions, and the
//! opponent-strategy prior used to seed opponent-encoding policy nodes.

use crate::classify::Grade;
use crate::Probability;

/// preflop potential token prior, indexed by token - `'0'`, matching
/// `checker()`'s ten-way branch in the order same-suit-in-order-picture,
/// same-suit-in-order, ..., not-same-suit not-pair not-in-order not-picture.
pub const PROB_PREFLOP: [Probability; 10] = [
    0.006, 0.012, 0.024, 0.054, 0.127, 0.109, 0.024, 0.048, 0.308, 0.288,
];

/// post-flop strength-grade prior, one row per round (flop, turn, river).
/// showdown resolution beyond the river reuses the river row. columns are
/// ordered `A,B,C,D,E,F,G` to match [`Grade::ALL`].
pub const PROB_POSTFLOP: [[Probability; 7]; 3] = [
    [0.0008, 0.0017, 0.0059, 0.0211, 0.0475, 0.4226, 0.5012],
    [0.000091, 0.00887, 0.0279, 0.036, 0.1244, 0.478, 0.325],
    [0.0003, 0.0277, 0.0765, 0.0483, 0.2350, 0.4380, 0.1740],
];

/// the post-flop probability row for a given round (1 = flop, 2 = turn,
/// 3+ = river/showdown).
pub fn postflop_row(round: usize) -> &'static [Probability; 7] {
    let index = round.saturating_sub(1).min(2);
    &PROB_POSTFLOP[index]
}

/// renormalizes a postflop row over grades at least as strong as
/// `previous`, per the monotonicity constraint: strength only improves or
/// holds across rounds. if `previous` is `None` (no prior round played yet)
/// the full row is returned unchanged.
pub fn monotone_row(row: &[Probability; 7], previous: Option<Grade>) -> Vec<(Grade, Probability)> {
    let floor = previous.map(|g| g.power()).unwrap_or(0);
    let mut entries: Vec<(Grade, Probability)> = Grade::ALL
        .iter()
        .copied()
        .zip(row.iter().copied())
        .filter(|(grade, _)| grade.power() >= floor)
        .collect();
    let total: Probability = entries.iter().map(|(_, p)| p).sum();
    if total > 0.0 {
        for (_, p) in entries.iter_mut() {
            *p /= total;
        }
    }
    entries
}

/// playstyle a training run assumes its opponents hold, used to pick which
/// row of [`OPPONENT_STRATEGY_PRIOR`] seeds fresh opponent-encoding nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentType {
    Pessimistic,
    Neutral,
    Confident,
}

/// opponent-strategy prior matrix: `[opponent type][phase][action]` where
/// phase is `0=preflop,1=postflop` and action is `[fold,call,raise,allin]`.
/// used to seed a fresh opponent-encoding policy node's strategy before any
/// regret has accumulated for it, via `Profile::set_strategy` rather than a
/// uniform start.
pub const OPPONENT_STRATEGY_PRIOR: [[[Probability; 4]; 2]; 3] = [
    [[0.40, 0.40, 0.10, 0.10], [0.30, 0.60, 0.09, 0.01]],
    [[0.05, 0.50, 0.40, 0.05], [0.15, 0.375, 0.375, 0.10]],
    [[0.01, 0.30, 0.60, 0.09], [0.10, 0.30, 0.30, 0.30]],
];

/// the opponent-strategy prior row for a given opponent type and round
/// (`0` preflop, `1+` postflop, collapsed to a single postflop phase).
pub fn opponent_strategy_prior(opponent_type: OpponentType, round: usize) -> &'static [Probability; 4] {
    let phase = if round == 0 { 0 } else { 1 };
    let row = match opponent_type {
        OpponentType::Pessimistic => 0,
        OpponentType::Neutral => 1,
        OpponentType::Confident => 2,
    };
    &OPPONENT_STRATEGY_PRIOR[row][phase]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflop_prior_sums_to_one() {
        let total: Probability = PROB_PREFLOP.iter().sum();
        assert!((total - 1.0).abs() < 1e-3);
    }

    #[test]
    fn postflop_rows_sum_to_one() {
        for row in PROB_POSTFLOP.iter() {
            let total: Probability = row.iter().sum();
            assert!((total - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn monotone_row_renormalizes() {
        let row = postflop_row(1);
        let entries = monotone_row(row, Some(Grade::E));
        let total: Probability = entries.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-3);
        assert!(entries.iter().all(|(g, _)| g.power() >= Grade::E.power()));
    }

    #[test]
    fn opponent_strategy_prior_rows_sum_to_one() {
        for opponent_type in [OpponentType::Pessimistic, OpponentType::Neutral, OpponentType::Confident] {
            for round in [0, 1] {
                let row = opponent_strategy_prior(opponent_type, round);
                let total: Probability = row.iter().sum();
                assert!((total - 1.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn opponent_strategy_prior_collapses_postflop_rounds() {
        assert_eq!(
            opponent_strategy_prior(OpponentType::Confident, 1),
            opponent_strategy_prior(OpponentType::Confident, 3)
        );
    }
}
