use super::card::Card;
use rand::seq::SliceRandom;
use rand::Rng;

/// a fixed 7-slot hand: indices 0..=1 are the hole cards, 2..=6 are the
/// community cards. unfilled slots are `None`, and once a slot is filled
/// every slot before it is filled too (community cards arrive in order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand([Option<Card>; 7]);

impl Hand {
    pub const EMPTY: Hand = Hand([None; 7]);

    pub fn new(slots: [Option<Card>; 7]) -> Self {
        Self(slots)
    }

    pub fn hole(&self) -> [Card; 2] {
        [
            self.0[0].expect("hole cards are always dealt"),
            self.0[1].expect("hole cards are always dealt"),
        ]
    }

    pub fn slots(&self) -> &[Option<Card>; 7] {
        &self.0
    }

    /// number of community cards filled: 0 preflop, 3 flop, 4 turn, 5 river.
    pub fn community_count(&self) -> usize {
        self.0[2..].iter().filter(|c| c.is_some()).count()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.0.iter().filter_map(|c| *c).collect()
    }

    /// deal a uniformly random distinct 7-card hand.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck: Vec<Card> = (0u8..52).map(Card::from).collect();
        deck.shuffle(rng);
        let mut slots = [None; 7];
        for i in 0..7 {
            slots[i] = Some(deck[i]);
        }
        Self(slots)
    }

    /// deal a hand whose hole cards alone determine a given starting-hand
    /// feature set, with five random (non-conflicting) community cards.
    pub fn deal_with_hole<R: Rng + ?Sized>(hole: [Card; 2], rng: &mut R) -> Self {
        let mut deck: Vec<Card> = (0u8..52)
            .map(Card::from)
            .filter(|c| *c != hole[0] && *c != hole[1])
            .collect();
        deck.shuffle(rng);
        let mut slots = [None; 7];
        slots[0] = Some(hole[0]);
        slots[1] = Some(hole[1]);
        for i in 0..5 {
            slots[2 + i] = Some(deck[i]);
        }
        Self(slots)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match slot {
                Some(card) => write!(f, "{card}")?,
                None => write!(f, "__")?,
            }
        }
        Ok(())
    }
}

impl crate::Arbitrary for Hand {
    fn random() -> Self {
        Self::deal(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_produces_distinct_cards() {
        let hand = Hand::deal(&mut rand::thread_rng());
        let mut cards = hand.cards();
        cards.sort_by_key(|c| c.to_int());
        cards.dedup();
        assert_eq!(cards.len(), 7);
    }
}
