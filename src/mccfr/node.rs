use super::edge::Edge;
use crate::classify::{highest_card, synthesize, Grade};
use crate::history::{decode_opponents, encode_opponents, reward_counter, round_of, OpponentBucket};
use crate::tables::{monotone_row, opponent_strategy_prior, postflop_row, OpponentType, PROB_PREFLOP};
use crate::{Chips, Probability, Utility};
use rand::Rng;

/// which role acts at a node, determined purely from `history.len() % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Chance,
    Opponent,
    Ai,
}

/// an owned, recursively-passed game-tree node. unlike an arena-backed
/// graph, nothing here needs a parent pointer: the traversal algorithm this
/// crate implements is purely top-down recursive and never walks back up a
/// chain of ancestors.
#[derive(Debug, Clone)]
pub struct GameNode {
    history: Vec<u8>,
    remaining_opponents: u8,
}

impl GameNode {
    pub fn root(remaining_opponents: u8) -> Self {
        Self {
            history: Vec::new(),
            remaining_opponents,
        }
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }

    pub fn round(&self) -> usize {
        round_of(self.history.len())
    }

    fn position(&self) -> usize {
        self.history.len() % 3
    }

    pub fn player(&self) -> Player {
        match self.position() {
            0 => Player::Chance,
            1 => Player::Opponent,
            2 => Player::Ai,
            _ => unreachable!("history position is always 0, 1, or 2 mod 3"),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.history.last(), Some(b'f') | Some(b'a'))
            || self.remaining_opponents == 0
            || self.history.len() >= 13
    }

    /// the most recently revealed post-flop strength grade, if any round has
    /// closed with one. `None` before the flop's grade token is drawn.
    pub fn last_known_grade(&self) -> Option<Grade> {
        if self.history.len() < 3 {
            return None;
        }
        let mut index = ((self.history.len() - 1) / 3) * 3;
        loop {
            if index == 0 {
                return None;
            }
            if let Ok(grade) = Grade::try_from(self.history[index]) {
                return Some(grade);
            }
            if index < 3 {
                return None;
            }
            index -= 3;
        }
    }

    fn opponent_bucket(&self) -> OpponentBucket {
        OpponentBucket::of(self.remaining_opponents)
    }

    /// chance-node children (the round's strength/potential draw) with
    /// their probabilities, renormalized over grades at least as strong as
    /// the previous round's grade. past the river (history length 12), the
    /// tree is bounded by a final showdown row: the same grade expansion,
    /// but each child resolves one more opponent and decrements
    /// `remaining_opponents`, so the walk cannot recurse past history
    /// length 13.
    pub fn chance_children(&self) -> Vec<(GameNode, Probability)> {
        assert_eq!(self.player(), Player::Chance, "chance_children called on a non-chance node");
        if self.round() == 0 {
            (0..10u8)
                .map(|token| (self.child_with_byte(b'0' + token), PROB_PREFLOP[token as usize]))
                .collect()
        } else if self.history.len() < 12 {
            let row = postflop_row(self.round());
            monotone_row(row, self.last_known_grade())
                .into_iter()
                .map(|(grade, p)| (self.child_with_byte(grade.byte()), p))
                .collect()
        } else {
            let row = postflop_row(self.round());
            monotone_row(row, self.last_known_grade())
                .into_iter()
                .map(|(grade, p)| (self.child_resolving_opponent(grade.byte()), p))
                .collect()
        }
    }

    /// the edges available at a policy-bearing node (AI action or
    /// opponent-encoding bucket).
    pub fn policy_edges(&self) -> Vec<Edge> {
        match self.player() {
            Player::Ai => Edge::AI.to_vec(),
            Player::Opponent => {
                let bucket = self.opponent_bucket();
                let counts: &[u8] = match bucket {
                    OpponentBucket::Upper => &[0, 1, 2, 3, 4],
                    OpponentBucket::Lower => &[0, 1, 2, 3],
                };
                counts
                    .iter()
                    .map(|&n| Edge::Opponent(encode_opponents(bucket, n)))
                    .collect()
            }
            Player::Chance => panic!("chance nodes have no policy edges"),
        }
    }

    /// the opponent-strategy prior row to seed a fresh opponent-bucket
    /// policy entry with, resolving the undefined opponent-node width in
    /// the original source by deriving a width-matching prior from the
    /// 4-wide `[fold,call,raise,allin]` opponent strategy matrix.
    pub fn opponent_prior(&self, opponent_type: OpponentType) -> Vec<Probability> {
        let base = opponent_strategy_prior(opponent_type, self.round());
        let edges = self.policy_edges();
        edges
            .iter()
            .map(|edge| match decode_opponents(edge.byte()) {
                Some((_, raise_count)) => base[2] * (raise_count as Probability + 1.0) + base[0],
                None => 1.0,
            })
            .collect()
    }

    pub fn apply(&self, edge: Edge) -> GameNode {
        self.child_with_byte(edge.byte())
    }

    fn child_with_byte(&self, byte: u8) -> GameNode {
        let mut history = self.history.clone();
        history.push(byte);
        GameNode {
            history,
            remaining_opponents: self.remaining_opponents,
        }
    }

    /// the final showdown row's child construction: resolves one more
    /// opponent, so `remaining_opponents` decrements on top of the usual
    /// grade-token append.
    fn child_resolving_opponent(&self, byte: u8) -> GameNode {
        let mut history = self.history.clone();
        history.push(byte);
        GameNode {
            history,
            remaining_opponents: self.remaining_opponents.saturating_sub(1),
        }
    }

    /// terminal utility, from the traversing AI's perspective, in
    /// small-blind training units.
    pub fn utility<R: Rng + ?Sized>(&self, raise_confidences: &[f32], rng: &mut R) -> Utility {
        assert!(self.is_terminal(), "utility queried on a non-terminal node");
        let (total, bet_pos) = reward_counter(&self.history, raise_confidences, rng);
        if self.history.last() == Some(&b'f') {
            return -(bet_pos as Utility);
        }
        self.showdown_utility(total, bet_pos, rng)
    }

    fn showdown_utility<R: Rng + ?Sized>(&self, total: Chips, bet_pos: Chips, rng: &mut R) -> Utility {
        let ai_grade = self.last_known_grade().unwrap_or_else(|| sample_grade(postflop_row(1), rng));
        let opponent_grade = sample_grade(postflop_row(self.round().max(1)), rng);
        match ai_grade.power().cmp(&opponent_grade.power()) {
            std::cmp::Ordering::Greater => (total - bet_pos) as Utility,
            std::cmp::Ordering::Less => -(bet_pos as Utility),
            std::cmp::Ordering::Equal if ai_grade != Grade::G => 0.0,
            std::cmp::Ordering::Equal => {
                let ai_hand = synthesize(ai_grade, rng);
                let opponent_hand = synthesize(opponent_grade, rng);
                match highest_card(&ai_hand).cmp(&highest_card(&opponent_hand)) {
                    std::cmp::Ordering::Greater => (total - bet_pos) as Utility,
                    std::cmp::Ordering::Less => -(bet_pos as Utility),
                    std::cmp::Ordering::Equal => 0.0,
                }
            }
        }
    }
}

fn sample_grade<R: Rng + ?Sized>(row: &[Probability; 7], rng: &mut R) -> Grade {
    let roll: Probability = rng.gen();
    let mut acc = 0.0;
    for (i, p) in row.iter().enumerate() {
        acc += p;
        if roll <= acc {
            return Grade::ALL[i];
        }
    }
    Grade::G
}
