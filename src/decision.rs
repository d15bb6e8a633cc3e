//! runtime decision policy: round-aware re-weighting of a trained 4-action
//! strategy vector `[fold, call, raise, allin]`, followed by availability
//! masking and a final sample.

use crate::classify::Grade;
use crate::history::{encode_opponents, OpponentBucket};
use crate::Chips;
use rand::Rng;

pub const FOLD: usize = 0;
pub const CALL: usize = 1;
pub const RAISE: usize = 2;
pub const ALLIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Raise,
    Allin,
}

/// the runtime game-state fields `decide()` needs beyond the trained
/// strategy vector itself.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub round: usize,
    pub grade: Option<Grade>,
    pub repeating: bool,
    pub raise_self: u32,
    pub standard: Chips,
    pub raise_diff: Chips,
    pub allin_bound: Chips,
    pub bet_pos: Chips,
    pub contest_money: Chips,
    pub sb_bet: Chips,
    /// the strength/potential byte (preflop `'0'..'9'` token or post-flop
    /// grade byte) pushed onto history when this round is entered for the
    /// first time. ignored on a repeating visit.
    pub strength_token: u8,
    /// how many opponents remain in the hand, used to pick the opponent-
    /// encoding bucket for a fresh history byte.
    pub remaining_opponents: u8,
    /// raises made by the table as a whole so far this round; combined with
    /// `raise_self` to derive the opponent-encoding raise count.
    pub raise_counter: u32,
}

impl Table {
    /// `round == 0` (preflop) or `round > 1` (turn/river) with a grade
    /// weaker than `E` -- the flop (`round == 1`) never takes this branch
    /// regardless of grade.
    fn cuts_raise_and_allin(&self) -> bool {
        self.round == 0 || (self.round > 1 && self.grade.map(|g| g.byte() > b'E').unwrap_or(false))
    }

    fn raise_limit(&self) -> f32 {
        self.sb_bet as f32 * 2.0 * crate::RAISE_LIMIT_MULTIPLIER
    }

    fn call_available(&self) -> bool {
        self.standard == self.bet_pos || self.standard < self.contest_money
    }

    fn raise_available(&self) -> bool {
        (self.raise_diff + self.standard - self.bet_pos) < self.contest_money
            && (self.raise_diff + self.standard) < self.allin_bound
            && (self.standard as f32) < self.raise_limit()
    }
}

/// maintains `history` for the round this `table` describes: on a
/// repeating visit to the same round (the strategy was already consulted
/// once this round and a new opponent action arrived), the stale
/// opponent-encoding byte is replaced with a fresh one; otherwise the
/// round's strength token and a fresh opponent-encoding byte are appended.
/// marks `table.repeating` to match, since the re-weighting cascade reads
/// it.
pub fn maintain_history(history: &mut Vec<u8>, table: &mut Table) {
    if table.round == 0 && !history.is_empty() {
        history.clear();
    }
    let repeating = !history.is_empty() && history.len() == 3 * table.round;
    let bucket = OpponentBucket::of(table.remaining_opponents);
    let raise_count = table.raise_counter.saturating_sub(table.raise_self) as u8;
    let fresh_encoding = encode_opponents(bucket, raise_count);
    if repeating {
        history.pop();
        history.push(fresh_encoding);
    } else {
        history.push(table.strength_token);
        history.push(fresh_encoding);
    }
    table.repeating = repeating;
}

/// appends the chosen action's byte to `history`.
pub fn append_action_byte(history: &mut Vec<u8>, action: Action) {
    history.push(match action {
        Action::Fold => b'f',
        Action::Call => b'c',
        Action::Raise => b'r',
        Action::Allin => b'a',
    });
}

/// re-weights `strategy` in place per the round/grade/raise-limit/repeating
/// cascade, masks unavailable actions, applies the half-percentage call
/// nudge, samples an action, and sizes its bet.
pub fn decide<R: Rng + ?Sized>(strategy: &mut [f32; 4], table: &Table, rng: &mut R) -> (Action, Chips) {
    apply_cascade(strategy, table);
    mask_availability(strategy, table);
    apply_half_percentage(strategy, table);

    let total: f32 = strategy.iter().sum();
    if total <= 0.0 {
        return (Action::Fold, 0);
    }
    for s in strategy.iter_mut() {
        *s /= total;
    }

    let roll: f32 = rng.gen();
    let mut acc = 0.0;
    for (i, s) in strategy.iter().enumerate() {
        acc += s;
        if roll < acc {
            return bet_action(i, strategy, table, rng);
        }
    }
    bet_action(ALLIN, strategy, table, rng)
}

fn bet_action<R: Rng + ?Sized>(index: usize, strategy: &[f32; 4], table: &Table, rng: &mut R) -> (Action, Chips) {
    match index {
        FOLD => (Action::Fold, 0),
        CALL => {
            let bet = if table.standard == table.bet_pos { 0 } else { table.standard - table.bet_pos };
            (Action::Call, bet)
        }
        RAISE => (Action::Raise, raise_amount(strategy[RAISE], table, rng)),
        _ => (Action::Allin, (table.allin_bound - table.bet_pos).min(table.contest_money)),
    }
}

fn apply_cascade(strategy: &mut [f32; 4], table: &Table) {
    if table.cuts_raise_and_allin() {
        let raise_pass = strategy[RAISE] * crate::RAISE_REDUCE;
        let allin_pass = strategy[ALLIN] * crate::ALLIN_REDUCE;
        strategy[RAISE] -= raise_pass;
        strategy[ALLIN] -= allin_pass;

        if table.round == 3 {
            strategy[CALL] += raise_pass + allin_pass + strategy[FOLD];
            strategy[FOLD] = 0.0;
        } else if (table.standard as f32) < table.raise_limit() && table.raise_self < 2 {
            strategy[CALL] += raise_pass + allin_pass;
        } else if (table.standard as f32) < table.raise_limit() {
            strategy[CALL] += raise_pass + allin_pass;
            shift_fold_into_call(strategy, table, crate::FOLD_REDUCE);
        } else {
            strategy[FOLD] += (raise_pass + allin_pass) * crate::MONEY_TOO_BIG_PASS;
            strategy[CALL] += (raise_pass + allin_pass) * (1.0 - crate::MONEY_TOO_BIG_PASS);
            if table.repeating {
                shift_fold_into_call(strategy, table, crate::REPEATING_REDUCE);
            }
        }
    } else if table.round == 3 {
        strategy[CALL] += strategy[FOLD];
        strategy[FOLD] = 0.0;
    } else {
        shift_fold_into_call(strategy, table, crate::FOLD_REDUCE);
    }
}

fn shift_fold_into_call(strategy: &mut [f32; 4], table: &Table, rate: f32) {
    let shift = strategy[FOLD] * rate;
    strategy[CALL] += shift;
    strategy[FOLD] -= shift;
    if table.repeating {
        let repeat_shift = strategy[FOLD] * crate::REPEATING_REDUCE;
        strategy[CALL] += repeat_shift;
        strategy[FOLD] -= repeat_shift;
    }
}

fn mask_availability(strategy: &mut [f32; 4], table: &Table) {
    if !table.call_available() {
        strategy[CALL] = 0.0;
    }
    if !table.raise_available() {
        strategy[RAISE] = 0.0;
    }
    // all-in is always available, matching the original source's
    // unconditional initial availability flag.
}

/// if the call amount already exceeds half of what's left to play for,
/// move half of the raise mass into call.
fn apply_half_percentage(strategy: &mut [f32; 4], table: &Table) {
    if (table.standard - table.bet_pos) as f32 >= 0.5 * table.contest_money as f32 {
        let half = strategy[RAISE] / 2.0;
        strategy[RAISE] -= half;
        strategy[CALL] += half;
    }
}

/// sizes a raise by confidence-scaled interpolation between the minimum
/// legal raise and the all-in boundary.
pub fn raise_amount<R: Rng + ?Sized>(confidence: f32, table: &Table, rng: &mut R) -> Chips {
    let ratio_to_allin = (table.allin_bound - table.bet_pos)
        .min(table.contest_money)
        .min(table.sb_bet * 2 * crate::RAISE_LIMIT_MULTIPLIER as Chips)
        as f32
        / table.standard as f32
        / crate::RAISE_SMALLEST_AMOUNT;
    let ratio_to_raise = (table.raise_diff + table.standard - table.bet_pos) as f32
        / table.standard as f32
        / crate::RAISE_SMALLEST_AMOUNT;

    let spread = ratio_to_allin - ratio_to_raise;
    let scale = if confidence >= 0.4 {
        0.8
    } else if confidence >= 0.3 {
        0.7
    } else if confidence >= 0.2 {
        0.6
    } else {
        0.4
    };
    let mut ratio = ratio_to_raise + rng.gen::<f32>() * spread * scale;
    ratio *= table.standard as f32;
    ratio = ratio.ceil();
    if ratio == ratio_to_allin * table.standard as f32 {
        ratio -= 1.0;
    }
    (ratio * crate::RAISE_SMALLEST_AMOUNT) as Chips
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn table() -> Table {
        Table {
            round: 1,
            grade: Some(Grade::C),
            repeating: false,
            raise_self: 0,
            standard: 4,
            raise_diff: 2,
            allin_bound: 200,
            bet_pos: 2,
            contest_money: 100,
            sb_bet: 1,
            strength_token: b'C',
            remaining_opponents: 6,
            raise_counter: 0,
        }
    }

    #[test]
    fn flop_never_cuts_raise_regardless_of_grade() {
        let mut t = table();
        t.round = 1;
        t.grade = Some(Grade::G);
        assert!(!t.cuts_raise_and_allin());
    }

    #[test]
    fn preflop_always_cuts() {
        let mut t = table();
        t.round = 0;
        assert!(t.cuts_raise_and_allin());
    }

    #[test]
    fn river_weak_grade_cuts() {
        let mut t = table();
        t.round = 3;
        t.grade = Some(Grade::G);
        assert!(t.cuts_raise_and_allin());
    }

    #[test]
    fn decide_always_returns_a_normalized_choice() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        let t = table();
        let mut strategy = [0.25, 0.25, 0.25, 0.25];
        let (action, bet) = decide(&mut strategy, &t, &mut rng);
        assert!(matches!(
            action,
            Action::Fold | Action::Call | Action::Raise | Action::Allin
        ));
        assert!(bet >= 0);
    }

    #[test]
    fn all_in_is_never_masked_out() {
        let mut t = table();
        t.standard = 1000; // beyond the raise limit, so raise gets masked
        let mut strategy = [0.1, 0.1, 0.1, 0.7];
        mask_availability(&mut strategy, &t);
        assert_eq!(strategy[RAISE], 0.0);
        assert_eq!(strategy[ALLIN], 0.7);
    }

    #[test]
    fn checking_costs_nothing_when_standard_equals_bet_pos() {
        let mut t = table();
        t.standard = 2;
        t.bet_pos = 2;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let (action, bet) = bet_action(CALL, &[0.0, 1.0, 0.0, 0.0], &t, &mut rng);
        assert_eq!(action, Action::Call);
        assert_eq!(bet, 0);
    }

    #[test]
    fn calling_costs_the_gap_to_standard() {
        let t = table();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let (action, bet) = bet_action(CALL, &[0.0, 1.0, 0.0, 0.0], &t, &mut rng);
        assert_eq!(action, Action::Call);
        assert_eq!(bet, t.standard - t.bet_pos);
    }

    #[test]
    fn allin_bet_is_capped_by_contest_money() {
        let mut t = table();
        t.contest_money = 10;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let (action, bet) = bet_action(ALLIN, &[0.0, 0.0, 0.0, 1.0], &t, &mut rng);
        assert_eq!(action, Action::Allin);
        assert_eq!(bet, 10);
    }

    #[test]
    fn maintain_history_appends_strength_and_encoding_on_a_fresh_round() {
        let mut history = Vec::new();
        let mut t = table();
        t.round = 0;
        t.strength_token = b'5';
        maintain_history(&mut history, &mut t);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], b'5');
        assert!(!t.repeating);
    }

    #[test]
    fn maintain_history_replaces_the_encoding_byte_on_a_repeat() {
        let mut history = vec![b'5', b'^', b'c'];
        let mut t = table();
        t.round = 1;
        t.raise_counter = 1;
        maintain_history(&mut history, &mut t);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], b'5');
        assert_eq!(history[1], b'^');
        assert_ne!(history[2], b'c');
        assert!(t.repeating);
    }

    #[test]
    fn preflop_entry_clears_a_stale_history() {
        let mut history = vec![b'A', b'K', b'c'];
        let mut t = table();
        t.round = 0;
        t.strength_token = b'5';
        maintain_history(&mut history, &mut t);
        assert_eq!(history, vec![b'5', encode_opponents(OpponentBucket::of(t.remaining_opponents), 0)]);
    }
}
