//! Deck of cards.
//!
//! Every deck starts as a copy of one canonical 52-card sequence built once
//! per process. The canonical sequence itself is never handed out mutably.

use crate::card::{Card, Rank, Suit};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

/// Canonical order: ranks deuce..ace, suits s/h/d/c within each rank.
static FULL_DECK: Lazy<[Card; 52]> = Lazy::new(|| {
    let mut cards = [Card::new(Rank::Two, Suit::Spades); 52];
    for (i, card) in cards.iter_mut().enumerate() {
        *card = Card::new(Rank::ALL[i / 4], Suit::ALL[i % 4]);
    }
    cards
});

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DeckError {
    #[error("cannot draw {requested} cards from a deck of {remaining}")]
    Exhausted { requested: usize, remaining: usize },
}

/// A fresh copy of the 52 cards in canonical order.
pub fn full_deck() -> Vec<Card> {
    FULL_DECK.to_vec()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A full deck shuffled with the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// A full deck shuffled with the given RNG.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle(rng);
        deck
    }

    /// A full deck in canonical order.
    pub fn ordered() -> Self {
        Self { cards: full_deck() }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the first `n` cards.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Remove `card` if present. Returns false (and changes nothing) otherwise.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove every card in `cards`; returns how many were actually present.
    pub fn remove_all(&mut self, cards: &[Card]) -> usize {
        cards.iter().filter(|&&c| self.remove(c)).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
