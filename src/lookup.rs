//! Prime-product lookup tables.
//!
//! Two maps cover all 7462 distinct five-card hand strengths:
//!
//! - `flush`: prime product of a five-rank same-suit pattern -> 1..=1599
//!   (10 straight flushes, then 1277 flushes).
//! - `unsuited`: prime product of five rank primes, with multiplicity ->
//!   11..=7462 (quads, full houses, straights, trips, two pair, pairs,
//!   high cards).
//!
//! Ranks are handed out by incrementing a counter while walking each
//! category from strongest to weakest. Nothing compares hands; the walk order
//! *is* the ranking, so every enumeration below is a fixed, ordered sequence
//! (ranks ace..deuce, kicker sets in lexicographic order of that list).

use crate::card::{Rank, PRIMES};
use crate::combinations::{combinations, n_choose_k};
use crate::rank::{HandRank, MAX_FLUSH, MAX_FULL_HOUSE, MAX_PAIR, MAX_STRAIGHT, MAX_STRAIGHT_FLUSH};
use crate::rank::{MAX_FOUR_OF_A_KIND, MAX_THREE_OF_A_KIND, MAX_TWO_PAIR};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Straight rank patterns, ace-high down to the five-high wheel.
pub const STRAIGHTS: [u32; 10] = [
    0b1_1111_0000_0000, // A K Q J T
    0b0_1111_1000_0000,
    0b0_0111_1100_0000,
    0b0_0011_1110_0000,
    0b0_0001_1111_0000,
    0b0_0000_1111_1000,
    0b0_0000_0111_1100,
    0b0_0000_0011_1110,
    0b0_0000_0001_1111, // 6 5 4 3 2
    0b1_0000_0000_1111, // 5 4 3 2 A
];

pub const FLUSH_TABLE_SIZE: usize = n_choose_k(13, 5);
pub const UNSUITED_TABLE_SIZE: usize = 6175;

static SHARED: Lazy<LookupTable> = Lazy::new(|| {
    let table = LookupTable::new();
    log::debug!(
        "built lookup tables: {} flush, {} unsuited",
        table.flush.len(),
        table.unsuited.len()
    );
    table
});

/// Successive bit patterns with the same popcount, in increasing order.
///
/// Each step is the constant-time "next permutation of bits":
/// `t = (b | (b - 1)) + 1; next = t | ((((t & -t) / (b & -b)) >> 1) - 1)`.
/// The seed itself is not yielded.
#[derive(Clone, Debug)]
pub struct RankPatterns {
    bits: u32,
}

impl RankPatterns {
    pub fn new(seed: u32) -> Self {
        debug_assert!(seed != 0);
        Self { bits: seed }
    }
}

impl Iterator for RankPatterns {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let b = self.bits;
        let t = (b | (b - 1)) + 1;
        // (t & -t) is strictly above (b & -b), so the shifted quotient is >= 1
        let next = t | ((((t & t.wrapping_neg()) / (b & b.wrapping_neg())) >> 1) - 1);
        self.bits = next;
        Some(next)
    }
}

/// Product of the primes of every rank set in `rank_bits`.
pub fn prime_product_from_rank_bits(rank_bits: u32) -> u32 {
    (0..13)
        .filter(|&i| rank_bits & (1u32 << i) != 0)
        .map(|i| PRIMES[i])
        .product()
}

#[derive(Clone, Debug)]
pub struct LookupTable {
    flush: HashMap<u32, HandRank>,
    unsuited: HashMap<u32, HandRank>,
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupTable {
    /// Build both tables from scratch.
    pub fn new() -> Self {
        let mut table = Self {
            flush: HashMap::with_capacity(FLUSH_TABLE_SIZE),
            unsuited: HashMap::with_capacity(UNSUITED_TABLE_SIZE),
        };
        table.flushes();
        table.multiples();
        table
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static LookupTable {
        &SHARED
    }

    #[inline]
    pub fn flush_rank(&self, prime_product: u32) -> Option<HandRank> {
        self.flush.get(&prime_product).copied()
    }

    #[inline]
    pub fn unsuited_rank(&self, prime_product: u32) -> Option<HandRank> {
        self.unsuited.get(&prime_product).copied()
    }

    pub fn flush_len(&self) -> usize {
        self.flush.len()
    }

    pub fn unsuited_len(&self) -> usize {
        self.unsuited.len()
    }

    /// Straight flushes, flushes, and (sharing the same patterns) straights
    /// and high cards.
    fn flushes(&mut self) {
        // every 5-of-13 pattern except the seed (itself a straight), minus straights
        let mut flushes: Vec<u32> = RankPatterns::new(0b11111)
            .take(FLUSH_TABLE_SIZE - 1)
            .filter(|p| !STRAIGHTS.contains(p))
            .collect();
        flushes.sort_unstable_by(|a, b| b.cmp(a));
        debug_assert_eq!(flushes.len(), FLUSH_TABLE_SIZE - STRAIGHTS.len());

        assign(&mut self.flush, 1, STRAIGHTS.iter().map(|&s| prime_product_from_rank_bits(s)));
        assign(
            &mut self.flush,
            MAX_FULL_HOUSE + 1,
            flushes.iter().map(|&f| prime_product_from_rank_bits(f)),
        );

        assign(
            &mut self.unsuited,
            MAX_FLUSH + 1,
            STRAIGHTS.iter().map(|&s| prime_product_from_rank_bits(s)),
        );
        assign(
            &mut self.unsuited,
            MAX_PAIR + 1,
            flushes.iter().map(|&f| prime_product_from_rank_bits(f)),
        );
    }

    /// Quads, full houses, trips, two pair and pairs.
    fn multiples(&mut self) {
        let desc: Vec<usize> = Rank::ALL.iter().rev().map(|r| r.idx() as usize).collect();
        let p = |r: usize, n: u32| PRIMES[r].pow(n);

        // quads: rank, then kicker
        let quads = desc
            .iter()
            .flat_map(|&r| except(&desc, &[r]).into_iter().map(move |k| p(r, 4) * p(k, 1)));
        let next = assign(&mut self.unsuited, MAX_STRAIGHT_FLUSH + 1, quads);
        debug_assert_eq!(next, MAX_FOUR_OF_A_KIND + 1);

        // full house: trips rank, then pair rank
        let boats = desc
            .iter()
            .flat_map(|&r| except(&desc, &[r]).into_iter().map(move |k| p(r, 3) * p(k, 2)));
        let next = assign(&mut self.unsuited, MAX_FOUR_OF_A_KIND + 1, boats);
        debug_assert_eq!(next, MAX_FULL_HOUSE + 1);

        // trips: rank, then two kickers
        let trips = desc.iter().flat_map(|&r| {
            let kickers = except(&desc, &[r]);
            combinations(&kickers, 2)
                .map(|k| p(r, 3) * p(k[0], 1) * p(k[1], 1))
                .collect::<Vec<_>>()
        });
        let next = assign(&mut self.unsuited, MAX_STRAIGHT + 1, trips);
        debug_assert_eq!(next, MAX_THREE_OF_A_KIND + 1);

        // two pair: both pair ranks, then kicker
        let two_pair = combinations(&desc, 2).flat_map(|pair| {
            let (hi, lo) = (pair[0], pair[1]);
            except(&desc, &[hi, lo])
                .into_iter()
                .map(move |k| p(hi, 2) * p(lo, 2) * p(k, 1))
        });
        let next = assign(&mut self.unsuited, MAX_THREE_OF_A_KIND + 1, two_pair);
        debug_assert_eq!(next, MAX_TWO_PAIR + 1);

        // pair: rank, then three kickers
        let pairs = desc.iter().flat_map(|&r| {
            let kickers = except(&desc, &[r]);
            combinations(&kickers, 3)
                .map(|k| p(r, 2) * p(k[0], 1) * p(k[1], 1) * p(k[2], 1))
                .collect::<Vec<_>>()
        });
        let next = assign(&mut self.unsuited, MAX_TWO_PAIR + 1, pairs);
        debug_assert_eq!(next, MAX_PAIR + 1);
    }
}

/// `ranks` with every entry of `skip` left out, order preserved.
fn except(ranks: &[usize], skip: &[usize]) -> Vec<usize> {
    ranks.iter().copied().filter(|r| !skip.contains(r)).collect()
}

/// Give consecutive ranks starting at `first` to `keys`, in order.
/// Returns the first rank not handed out.
fn assign<I>(map: &mut HashMap<u32, HandRank>, first: HandRank, keys: I) -> HandRank
where
    I: IntoIterator<Item = u32>,
{
    let mut rank = first;
    for key in keys {
        map.insert(key, rank);
        rank += 1;
    }
    rank
}
