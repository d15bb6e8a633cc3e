use super::opponent::{decode_opponents, OpponentBucket};
use crate::Chips;
use rand::Rng;

/// replays a history string to recover `(total, bet_pos)` in small-blind
/// units: `total` is the whole pot contested so far, `bet_pos` is the
/// amount the AI itself has put in. `raise_confidences[k]` is the strategy
/// weight the AI's own k-th raise in this history carried at the moment it
/// was taken (needed to reconstruct how large that raise was).
///
/// opponent-encoding bytes are replayed stochastically: the true remaining
/// player count and which of them raised are resampled from the byte's
/// bucket, since the history itself only records an aggregate encoding, not
/// the exact identities. each opponent's raise count is capped at
/// [`crate::MAX_RAISE_REPEATS`] -- an opponent already at the cap absorbs no
/// further raise and the assignment retries.
pub fn reward_counter<R: Rng + ?Sized>(
    history: &[u8],
    raise_confidences: &[f32],
    rng: &mut R,
) -> (Chips, Chips) {
    let mut total = 3 * crate::SB_TRAIN;
    let mut standard = crate::CALL_TRAIN;
    let mut bet_pos = 2 * crate::SB_TRAIN;
    let mut raise_diff = standard;
    let mut num_raise = 0usize;

    for (i, &b) in history.iter().enumerate().skip(1) {
        match b {
            b'c' => {
                total += (standard - bet_pos).max(0);
                bet_pos = standard;
            }
            b'r' => {
                let confidence = raise_confidences.get(num_raise).copied().unwrap_or(0.0);
                let my_raise = raise_for_confidence(confidence, standard, raise_diff);
                raise_diff = my_raise - standard;
                total += my_raise;
                standard = my_raise;
                bet_pos = my_raise;
                num_raise += 1;
            }
            b'a' => {
                total += crate::ALLIN_TRAIN;
                bet_pos += crate::ALLIN_TRAIN;
                standard = standard.min(bet_pos);
            }
            _ if i % 3 == 1 => {
                if let Some((bucket, raise_number)) = decode_opponents(b) {
                    replay_opponent_round(bucket, raise_number, &mut total, &mut standard, &mut raise_diff, rng);
                }
                // unknown byte: "no adjustment", per the error-handling design.
            }
            _ => {}
        }
    }
    (total, bet_pos)
}

fn raise_for_confidence(confidence: f32, standard: Chips, raise_diff: Chips) -> Chips {
    let multiplier = if confidence >= 0.6 {
        2.0
    } else if confidence >= 0.4 {
        1.75
    } else if confidence >= 0.3 {
        1.25
    } else {
        1.0
    };
    standard + ((raise_diff as f32) * multiplier) as Chips
}

fn replay_opponent_round<R: Rng + ?Sized>(
    bucket: OpponentBucket,
    raise_number: u8,
    total: &mut Chips,
    standard: &mut Chips,
    raise_diff: &mut Chips,
    rng: &mut R,
) {
    let remaining_players: u8 = match bucket {
        OpponentBucket::Upper => rng.gen_range(0..5) + 4,
        OpponentBucket::Lower => rng.gen_range(0..3) + 1,
    };
    let mut raises_by_opponent = vec![0u8; remaining_players as usize];
    let mut assigned = 0u8;
    let mut attempts = 0usize;
    while assigned < raise_number && attempts < 10_000 {
        attempts += 1;
        let pick = rng.gen_range(0..remaining_players as usize);
        if raises_by_opponent[pick] as usize == crate::MAX_RAISE_REPEATS {
            continue;
        }
        raises_by_opponent[pick] += 1;
        assigned += 1;
    }
    for &raises in &raises_by_opponent {
        if raises > 0 {
            let enemy_raise = (((*raise_diff as f32) * 1.5) as Chips) * raises as Chips;
            *raise_diff = enemy_raise - *standard;
            *total += enemy_raise;
            *standard = enemy_raise;
        } else {
            *total += *standard;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn conservation_holds_for_a_closed_preflop_call() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0);
        let history = b"9Kc";
        let (total, bet_pos) = reward_counter(history, &[], &mut rng);
        assert_eq!(total, 4);
        assert_eq!(bet_pos, 2);
    }

    #[test]
    fn reward_is_always_conserved() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        for history in [&b"9Kc"[..], b"9Krc", b"9!f"] {
            let (total, bet_pos) = reward_counter(history, &[0.5, 0.5, 0.5], &mut rng);
            assert!(total >= bet_pos);
            assert!(bet_pos >= 0);
            assert!(total >= 3 * crate::SB_TRAIN);
        }
    }
}
