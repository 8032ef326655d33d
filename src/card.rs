//! Card types (Suit/Rank/Card).
//!
//! A `Card` is a single packed `u32`:
//!
//! ```text
//! bits 16..28 : bit_rank, one-hot over the 13 ranks
//! bits 12..15 : suit, one-hot (spades=1, hearts=2, diamonds=4, clubs=8)
//! bits  8..11 : rank index (0=deuce .. 12=ace)
//! bits  0..5  : rank prime
//! ```
//!
//! Ranks carry a prime so that the product of a hand's primes identifies its
//! rank multiset regardless of order.

use std::fmt;
use std::str::FromStr;

/// Rank characters in index order (deuce..ace).
pub const RANK_CHARS: &[u8; 13] = b"23456789TJQKA";

/// One prime per rank, deuce..ace.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CardError {
    #[error("invalid card string {0:?}: expected two characters")]
    InvalidLength(String),
    #[error("invalid rank character {0:?}")]
    InvalidRank(char),
    #[error("invalid suit character {0:?}")]
    InvalidSuit(char),
}

/// A playing card suit. The discriminant is the one-hot suit field.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Suit {
    Spades = 1,
    Hearts = 2,
    Diamonds = 4,
    Clubs = 8,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// 0..3 in `ALL` order.
    #[inline(always)]
    pub const fn idx(self) -> usize {
        (self as u8).trailing_zeros() as usize
    }

    pub const fn from_char(c: char) -> Option<Suit> {
        match c {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    /// Inverse of `bits`. Input is assumed to be one of the four suit bits.
    #[inline(always)]
    const fn from_bits(x: u32) -> Suit {
        match x {
            1 => Suit::Spades,
            2 => Suit::Hearts,
            4 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }
}

/// A playing card rank.
///
/// We store ranks as 0..12 (Two..Ace). This matches a 13-bit mask naturally.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    /// Convert 0..12 to a Rank (Two..Ace). Input is assumed valid.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        Rank::ALL[(x % 13) as usize]
    }

    pub fn from_char(c: char) -> Option<Rank> {
        RANK_CHARS
            .iter()
            .position(|&r| r as char == c)
            .map(|i| Rank::ALL[i])
    }

    pub const fn to_char(self) -> char {
        RANK_CHARS[self as usize] as char
    }
}

/// A card packed into 32 bits; see the module docs for the layout.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Card(u32);

impl Card {
    pub const SUIT_MASK: u32 = 0xF000;

    #[inline(always)]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        let r = rank as u32;
        Self((1 << r << 16) | (suit.bits() << 12) | (r << 8) | PRIMES[r as usize])
    }

    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn rank_index(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    #[inline(always)]
    pub const fn rank(self) -> Rank {
        Rank::from_u8(self.rank_index())
    }

    /// One-hot suit field (shifted down to bits 0..3).
    #[inline(always)]
    pub const fn suit_bits(self) -> u32 {
        (self.0 >> 12) & 0xF
    }

    #[inline(always)]
    pub const fn suit(self) -> Suit {
        Suit::from_bits(self.suit_bits())
    }

    /// One-hot rank field (shifted down to bits 0..12).
    #[inline(always)]
    pub const fn bit_rank(self) -> u32 {
        (self.0 >> 16) & 0x1FFF
    }

    #[inline(always)]
    pub const fn prime(self) -> u32 {
        self.0 & 0x3F
    }

    /// Dense 0..51 index: rank * 4 + suit index.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.rank_index() * 4 + self.suit().idx() as u8
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r, su) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => (r, su),
            _ => return Err(CardError::InvalidLength(s.to_string())),
        };
        let rank = Rank::from_char(r).ok_or(CardError::InvalidRank(r))?;
        let suit = Suit::from_char(su).ok_or(CardError::InvalidSuit(su))?;
        Ok(Card::new(rank, suit))
    }
}

impl TryFrom<&str> for Card {
    type Error = CardError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().to_char(), self.suit().to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self)
    }
}

/// Parse whitespace-separated card tokens, e.g. `"As Kd 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn packed_layout() {
        let ace_spades: Card = "As".parse().unwrap();
        assert_eq!(ace_spades.as_u32(), 268_442_665);
        assert_eq!(ace_spades.rank_index(), 12);
        assert_eq!(ace_spades.suit_bits(), 1);
        assert_eq!(ace_spades.bit_rank(), 4096);
        assert_eq!(ace_spades.prime(), 41);

        let deuce_clubs: Card = "2c".parse().unwrap();
        assert_eq!(deuce_clubs.as_u32(), 98_306);
        assert_eq!(deuce_clubs.suit(), Suit::Clubs);
        assert_eq!(deuce_clubs.rank(), Rank::Two);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!("Xs".parse::<Card>(), Err(CardError::InvalidRank('X')));
        assert_eq!("ax".parse::<Card>(), Err(CardError::InvalidRank('a')));
        assert_eq!("Ax".parse::<Card>(), Err(CardError::InvalidSuit('x')));
        assert_eq!("AS".parse::<Card>(), Err(CardError::InvalidSuit('S')));
        assert!(matches!("A".parse::<Card>(), Err(CardError::InvalidLength(_))));
        assert!(matches!("Asd".parse::<Card>(), Err(CardError::InvalidLength(_))));
        assert!(matches!("".parse::<Card>(), Err(CardError::InvalidLength(_))));
    }

    #[test]
    fn encoding_is_bijective() {
        let mut seen = HashSet::new();
        let mut indices = HashSet::new();
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let c = Card::new(rank, suit);
                assert_eq!(c.rank(), rank);
                assert_eq!(c.suit(), suit);
                assert_eq!(c.prime(), rank.prime());
                assert_eq!(c.bit_rank(), 1 << rank.idx());
                assert_eq!(c.to_string().parse::<Card>(), Ok(c));
                assert!(seen.insert(c.as_u32()));
                assert!(indices.insert(c.index()));
            }
        }
        assert_eq!(seen.len(), 52);
        assert!(indices.iter().all(|&i| i < 52));
    }

    #[test]
    fn parse_card_list() {
        let cards = parse_cards("Qh  Ts\t2c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1], Card::new(Rank::Ten, Suit::Spades));
        assert!(parse_cards("Qh 1s").is_err());
        assert!(parse_cards("").unwrap().is_empty());
    }
}
