//! Hand strength ranks and rank classes.
//!
//! A `HandRank` is 1..=7462, lower is stronger:
//!
//! ```text
//!    1..=10    straight flush (1 = royal)
//!   11..=166   four of a kind
//!  167..=322   full house
//!  323..=1599  flush
//! 1600..=1609  straight
//! 1610..=2467  three of a kind
//! 2468..=3325  two pair
//! 3326..=6185  one pair
//! 6186..=7462  high card
//! ```

use std::fmt;

pub type HandRank = u16;

pub const MAX_STRAIGHT_FLUSH: HandRank = 10;
pub const MAX_FOUR_OF_A_KIND: HandRank = 166;
pub const MAX_FULL_HOUSE: HandRank = 322;
pub const MAX_FLUSH: HandRank = 1599;
pub const MAX_STRAIGHT: HandRank = 1609;
pub const MAX_THREE_OF_A_KIND: HandRank = 2467;
pub const MAX_TWO_PAIR: HandRank = 3325;
pub const MAX_PAIR: HandRank = 6185;
pub const MAX_HIGH_CARD: HandRank = 7462;

/// Hand categories, strongest first. The discriminant is the class number.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum RankClass {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    Pair = 8,
    HighCard = 9,
}

impl RankClass {
    pub const ALL: [RankClass; 9] = [
        RankClass::StraightFlush,
        RankClass::FourOfAKind,
        RankClass::FullHouse,
        RankClass::Flush,
        RankClass::Straight,
        RankClass::ThreeOfAKind,
        RankClass::TwoPair,
        RankClass::Pair,
        RankClass::HighCard,
    ];

    /// Weakest (largest) rank belonging to each class, in `ALL` order.
    pub const UPPER_BOUNDS: [HandRank; 9] = [
        MAX_STRAIGHT_FLUSH,
        MAX_FOUR_OF_A_KIND,
        MAX_FULL_HOUSE,
        MAX_FLUSH,
        MAX_STRAIGHT,
        MAX_THREE_OF_A_KIND,
        MAX_TWO_PAIR,
        MAX_PAIR,
        MAX_HIGH_CARD,
    ];

    /// Class of `rank`, or `None` outside 1..=7462.
    ///
    /// Bounds are tested strongest to weakest; the first bound not exceeded wins.
    pub fn from_rank(rank: HandRank) -> Option<RankClass> {
        if rank == 0 {
            return None;
        }
        Self::UPPER_BOUNDS
            .iter()
            .position(|&max| rank <= max)
            .map(|i| Self::ALL[i])
    }

    /// 1 (straight flush) ..= 9 (high card).
    #[inline(always)]
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<RankClass> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RankClass::StraightFlush => "Straight Flush",
            RankClass::FourOfAKind => "Four of a Kind",
            RankClass::FullHouse => "Full House",
            RankClass::Flush => "Flush",
            RankClass::Straight => "Straight",
            RankClass::ThreeOfAKind => "Three of a Kind",
            RankClass::TwoPair => "Two Pair",
            RankClass::Pair => "Pair",
            RankClass::HighCard => "High Card",
        }
    }
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale a rank into (0, 1]; 1.0 is the weakest high card.
#[inline]
pub fn five_card_rank_percentage(rank: HandRank) -> f64 {
    rank as f64 / MAX_HIGH_CARD as f64
}
