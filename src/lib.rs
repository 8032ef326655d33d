//! Poker hand evaluation and Monte Carlo win estimation.
//!
//! Five-card hands are ranked 1 (royal flush) ..= 7462 (seven-high) through
//! two prime-product lookup tables built once per process; six and seven
//! card hands take the best five-card subset.

pub mod card;
pub mod combinations;
pub mod deck;
pub mod lookup;
pub mod rank;
pub mod evaluator;
pub mod batch;
pub mod equity;

pub use card::{parse_cards, Card, CardError, Rank, Suit};
pub use combinations::{combinations, n_choose_k, Combinations};
pub use deck::{full_deck, Deck, DeckError};
pub use lookup::{LookupTable, RankPatterns};
pub use rank::{five_card_rank_percentage, HandRank, RankClass};
pub use evaluator::{EvalError, Evaluator};

pub use equity::{
    estimate_win_probability,
    estimate_win_probability_with_config,
    EquityCounts,
    EquityError,
    EstimateConfig,
    HandResult,
    Outcome,
};
