//! Lookup-based evaluator over packed cards.
//!
//! Five cards resolve with one table lookup. Six or seven cards are the best
//! (numerically smallest) rank over every five-card subset.

use crate::card::{Card, Rank, Suit};
use crate::combinations::Combinations;
use crate::lookup::{prime_product_from_rank_bits, LookupTable};
use crate::rank::{five_card_rank_percentage, HandRank, RankClass, MAX_HIGH_CARD};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("expected 5, 6 or 7 cards in hand and board combined, got {0}")]
    InvalidCardCount(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("hand rank {0} is outside 1..=7462")]
    RankOutOfRange(u16),
    #[error("no table entry for prime product {0}")]
    UnrankedPattern(u32),
}

/// Hand evaluator backed by the process-wide lookup table.
///
/// Cheap to copy; every copy reads the same immutable table.
#[derive(Copy, Clone, Debug)]
pub struct Evaluator {
    table: &'static LookupTable,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            table: LookupTable::shared(),
        }
    }

    pub fn table(&self) -> &'static LookupTable {
        self.table
    }

    /// Rank of the best five-card hand from `hand` and `board` together.
    pub fn evaluate(&self, hand: &[Card], board: &[Card]) -> Result<HandRank, EvalError> {
        let n = hand.len() + board.len();
        if !(5..=7).contains(&n) {
            return Err(EvalError::InvalidCardCount(n));
        }
        let mut cards = [Card::new(Rank::Two, Suit::Spades); 7];
        for (slot, &c) in cards.iter_mut().zip(hand.iter().chain(board)) {
            *slot = c;
        }
        self.evaluate_cards(&cards[..n])
    }

    /// Rank of the best five-card hand within `cards` (5, 6 or 7 of them).
    pub fn evaluate_cards(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EvalError::InvalidCardCount(cards.len()));
        }
        check_distinct(cards)?;

        if let [a, b, c, d, e] = *cards {
            return self.evaluate_five(&[a, b, c, d, e]);
        }

        let mut best = MAX_HIGH_CARD;
        let mut subsets = Combinations::new(cards, 5);
        while let Some(idx) = subsets.next_indices() {
            let five = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
            best = best.min(self.evaluate_five(&five)?);
        }
        Ok(best)
    }

    /// Single lookup for exactly five distinct cards.
    #[inline]
    fn evaluate_five(&self, cards: &[Card; 5]) -> Result<HandRank, EvalError> {
        let suits = cards.iter().fold(Card::SUIT_MASK, |acc, c| acc & c.as_u32());
        if suits & Card::SUIT_MASK != 0 {
            let rank_bits = cards.iter().fold(0, |acc, c| acc | c.bit_rank());
            let product = prime_product_from_rank_bits(rank_bits);
            return self
                .table
                .flush_rank(product)
                .ok_or(EvalError::UnrankedPattern(product));
        }

        // per-card primes, so pairs/trips/quads keep their multiplicity
        let product: u32 = cards.iter().map(|c| c.prime()).product();
        self.table
            .unsuited_rank(product)
            .ok_or(EvalError::UnrankedPattern(product))
    }

    pub fn rank_class(&self, rank: HandRank) -> Result<RankClass, EvalError> {
        RankClass::from_rank(rank).ok_or(EvalError::RankOutOfRange(rank))
    }

    /// Name of a class number 1..=9, `None` otherwise.
    pub fn class_to_string(&self, class: u8) -> Option<&'static str> {
        RankClass::from_number(class).map(RankClass::as_str)
    }

    pub fn five_card_rank_percentage(&self, rank: HandRank) -> f64 {
        five_card_rank_percentage(rank)
    }
}

#[inline]
fn check_distinct(cards: &[Card]) -> Result<(), EvalError> {
    let mut seen: u64 = 0;
    for &c in cards {
        let bit = 1u64 << c.index();
        if seen & bit != 0 {
            return Err(EvalError::DuplicateCard(c));
        }
        seen |= bit;
    }
    Ok(())
}
