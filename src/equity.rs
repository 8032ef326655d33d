//! Monte Carlo win/tie/loss estimation against random opponents.
//!
//! The iteration budget is split across a fixed set of workers. Each worker
//! owns its RNG and deck, counts outcomes locally, and reports once; counts
//! are summed only after every worker has returned.

use crate::card::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{EvalError, Evaluator};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;
use std::ops::Add;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const MAX_OPPONENTS: usize = 9;
pub const MIN_ITERATIONS: usize = 1000;

/// Opponents a single deck can serve: 52 - 2 (hand) - 5 (board), two cards each.
const DEALABLE_OPPONENTS: usize = (52 - 2 - 5) / 2;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EquityError {
    #[error("hand must contain exactly two cards, got {0}")]
    InvalidHandSize(usize),
    #[error("board must contain between 0 and 5 cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("number of opponents must not exceed {max}, got {got}")]
    TooManyOpponents { got: usize, max: usize },
    #[error("iterations must be at least {min}, got {got}")]
    TooFewIterations { got: usize, min: usize },
    #[error("card {0} is both in the hand and on the board, or listed twice")]
    DuplicateCard(Card),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct EquityCounts {
    pub win: u64,
    pub tie: u64,
    pub loss: u64,
}

impl EquityCounts {
    #[inline(always)]
    pub fn total(&self) -> u64 {
        self.win + self.tie + self.loss
    }

    #[inline(always)]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::Loss => self.loss += 1,
        }
    }
}

impl Add for EquityCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            win: self.win + rhs.win,
            tie: self.tie + rhs.tie,
            loss: self.loss + rhs.loss,
        }
    }
}

/// Outcome probabilities of one estimate.
///
/// A tie means the hand shared the best rank with at least one opponent and
/// nobody beat it; it is reported on its own, never folded into win or loss.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HandResult {
    pub win_probability: f64,
    pub tie_probability: f64,
    pub loss_probability: f64,
    pub win_or_tie_probability: f64,
    pub iterations: usize,
}

impl HandResult {
    fn from_counts(counts: EquityCounts, iterations: usize) -> Self {
        let n = iterations as f64;
        Self {
            win_probability: counts.win as f64 / n,
            tie_probability: counts.tie as f64 / n,
            loss_probability: counts.loss as f64 / n,
            win_or_tie_probability: (counts.win + counts.tie) as f64 / n,
            iterations,
        }
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win: {:.2}%, Tie: {:.2}%, Loss: {:.2}%, Win+Tie: {:.2}% (from {} iterations)",
            self.win_probability * 100.0,
            self.tie_probability * 100.0,
            self.loss_probability * 100.0,
            self.win_or_tie_probability * 100.0,
            self.iterations,
        )
    }
}

/// Validation thresholds and RNG seeding for an estimate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EstimateConfig {
    pub min_iterations: usize,
    pub max_opponents: usize,
    /// `Some(s)`: worker `i` seeds from `s + i`, making results reproducible
    /// on a given machine. `None`: every worker seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            min_iterations: MIN_ITERATIONS,
            max_opponents: MAX_OPPONENTS,
            seed: None,
        }
    }
}

impl EstimateConfig {
    pub fn with_min_iterations(mut self, min_iterations: usize) -> Self {
        self.min_iterations = min_iterations;
        self
    }

    pub fn with_max_opponents(mut self, max_opponents: usize) -> Self {
        self.max_opponents = max_opponents;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Estimate with the default thresholds (1000 iterations, 9 opponents).
pub fn estimate_win_probability(
    hand: &[Card],
    board: &[Card],
    opponents: usize,
    iterations: usize,
) -> Result<HandResult, EquityError> {
    estimate_win_probability_with_config(hand, board, opponents, iterations, &EstimateConfig::default())
}

/// Estimate how often `hand` wins, ties or loses on `board` (completed at
/// random) against `opponents` random two-card hands.
pub fn estimate_win_probability_with_config(
    hand: &[Card],
    board: &[Card],
    opponents: usize,
    iterations: usize,
    config: &EstimateConfig,
) -> Result<HandResult, EquityError> {
    validate(hand, board, opponents, iterations, config)?;

    let job = Job {
        evaluator: Evaluator::new(),
        hand: [hand[0], hand[1]],
        board: board.to_vec(),
        known: hand.iter().chain(board).copied().collect(),
        opponents,
        seed: config.seed,
    };
    let shares = partition(iterations, worker_count(iterations));
    log::debug!(
        "estimating {} vs {} opponents: {} iterations over {} workers",
        hand.iter().map(Card::to_string).collect::<Vec<_>>().join(" "),
        opponents,
        iterations,
        shares.len()
    );

    #[cfg(feature = "parallel")]
    let per_worker: Vec<EquityCounts> = shares
        .par_iter()
        .enumerate()
        .map(|(id, &n)| job.run(id, n))
        .collect::<Result<_, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let per_worker: Vec<EquityCounts> = shares
        .iter()
        .enumerate()
        .map(|(id, &n)| job.run(id, n))
        .collect::<Result<_, _>>()?;

    let counts = per_worker
        .into_iter()
        .fold(EquityCounts::default(), |acc, c| acc + c);
    debug_assert_eq!(counts.total(), iterations as u64);

    let result = HandResult::from_counts(counts, iterations);
    log::debug!("estimate finished: {result}");
    Ok(result)
}

fn validate(
    hand: &[Card],
    board: &[Card],
    opponents: usize,
    iterations: usize,
    config: &EstimateConfig,
) -> Result<(), EquityError> {
    if hand.len() != 2 {
        return Err(EquityError::InvalidHandSize(hand.len()));
    }
    if board.len() > 5 {
        return Err(EquityError::TooManyBoardCards(board.len()));
    }
    let max = config.max_opponents.min(DEALABLE_OPPONENTS);
    if opponents > max {
        return Err(EquityError::TooManyOpponents { got: opponents, max });
    }
    let min = config.min_iterations.max(1);
    if iterations < min {
        return Err(EquityError::TooFewIterations { got: iterations, min });
    }

    let mut used: u64 = 0;
    for &c in hand.iter().chain(board) {
        let bit = 1u64 << c.index();
        if used & bit != 0 {
            return Err(EquityError::DuplicateCard(c));
        }
        used |= bit;
    }
    Ok(())
}

/// Available parallelism, capped by the iteration count, at least one.
fn worker_count(iterations: usize) -> usize {
    num_cpus::get().min(iterations).max(1)
}

/// Split `iterations` into `workers` shares; the first `iterations % workers`
/// shares carry one extra iteration.
fn partition(iterations: usize, workers: usize) -> Vec<usize> {
    let base = iterations / workers;
    let extra = iterations % workers;
    (0..workers).map(|i| base + usize::from(i < extra)).collect()
}

/// Read-only inputs shared by every worker.
struct Job {
    evaluator: Evaluator,
    hand: [Card; 2],
    board: Vec<Card>,
    known: Vec<Card>,
    opponents: usize,
    seed: Option<u64>,
}

impl Job {
    /// One worker: `iterations` independent deals on a private RNG.
    fn run(&self, id: usize, iterations: usize) -> Result<EquityCounts, EquityError> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(id as u64)),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut counts = EquityCounts::default();
        for _ in 0..iterations {
            counts.record(self.deal(&mut rng)?);
        }
        log::trace!("worker {id}: {iterations} iterations -> {counts:?}");
        Ok(counts)
    }

    fn deal(&self, rng: &mut SmallRng) -> Result<Outcome, EquityError> {
        let mut deck = Deck::ordered();
        deck.remove_all(&self.known);
        deck.shuffle(rng);

        let mut board = Vec::with_capacity(5);
        board.extend_from_slice(&self.board);
        board.extend(deck.draw(5 - self.board.len())?);

        let ours = self.evaluator.evaluate(&self.hand, &board)?;
        let mut tied = false;
        for _ in 0..self.opponents {
            let theirs = self.evaluator.evaluate(&deck.draw(2)?, &board)?;
            if theirs < ours {
                return Ok(Outcome::Loss);
            }
            tied |= theirs == ours;
        }
        Ok(if tied { Outcome::Tie } else { Outcome::Win })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn seeded(seed: u64) -> EstimateConfig {
        EstimateConfig::default().with_seed(seed)
    }

    #[test]
    fn partition_accounts_for_every_iteration() {
        assert_eq!(partition(10, 3), vec![4, 3, 3]);
        assert_eq!(partition(12, 4), vec![3, 3, 3, 3]);
        assert_eq!(partition(5, 5), vec![1, 1, 1, 1, 1]);
        for (iters, workers) in [(1000, 7), (1001, 16), (20_000, 12), (1, 1)] {
            let shares = partition(iters, workers);
            assert_eq!(shares.len(), workers);
            assert_eq!(shares.iter().sum::<usize>(), iters);
            let (lo, hi) = (shares.iter().min().unwrap(), shares.iter().max().unwrap());
            assert!(hi - lo <= 1);
            assert!(shares.windows(2).all(|w| w[0] >= w[1]));
        }
        assert!(worker_count(3) <= 3);
        assert!(worker_count(1_000_000) >= 1);
    }

    #[test]
    fn royal_flush_on_board_no_opponents_always_wins() {
        let r = estimate_win_probability(&cards("2c 3d"), &cards("As Ks Qs Js Ts"), 0, 1000).unwrap();
        assert_eq!(r.win_probability, 1.0);
        assert_eq!(r.tie_probability, 0.0);
        assert_eq!(r.loss_probability, 0.0);
        assert_eq!(r.win_or_tie_probability, 1.0);
        assert_eq!(r.iterations, 1000);

        let r = estimate_win_probability(&cards("As Ks"), &cards("Qs Js Ts"), 0, 2500).unwrap();
        assert_eq!(r.win_probability, 1.0);
        assert_eq!(r.iterations, 2500);
    }

    #[test]
    fn royal_flush_on_board_always_ties_opponents() {
        for opponents in [1, 4, MAX_OPPONENTS] {
            let r = estimate_win_probability(&cards("2c 3d"), &cards("As Ks Qs Js Ts"), opponents, 1000)
                .unwrap();
            assert_eq!(r.tie_probability, 1.0, "{opponents} opponents");
            assert_eq!(r.loss_probability, 0.0);
            assert_eq!(r.win_probability, 0.0);
        }
    }

    #[test]
    fn royal_flush_in_hand_never_loses() {
        let r = estimate_win_probability(&cards("As Ks"), &cards("Qs Js Ts"), 3, 2000).unwrap();
        assert_eq!(r.win_probability, 1.0);
    }

    #[test]
    fn pocket_aces_heads_up() {
        let r = estimate_win_probability_with_config(&cards("Ac Ad"), &[], 1, 20_000, &seeded(42)).unwrap();
        assert!(
            (0.82..=0.88).contains(&r.win_probability),
            "pocket aces won {}",
            r.win_probability
        );
        let sum = r.win_probability + r.tie_probability + r.loss_probability;
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((r.win_or_tie_probability - (r.win_probability + r.tie_probability)).abs() < 1e-12);
    }

    #[test]
    fn weak_hand_against_a_field() {
        let r = estimate_win_probability_with_config(&cards("2c 7d"), &cards("Ah Kd Qc"), 3, 10_000, &seeded(1))
            .unwrap();
        assert!(r.win_probability < 0.2, "2-7 offsuit won {}", r.win_probability);
    }

    #[test]
    fn seeded_estimates_repeat() {
        let hand = cards("Th 9h");
        let board = cards("8h 2c");
        let a = estimate_win_probability_with_config(&hand, &board, 2, 5000, &seeded(7)).unwrap();
        let b = estimate_win_probability_with_config(&hand, &board, 2, 5000, &seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn validation_errors() {
        let aces = cards("As Ah");
        assert_eq!(
            estimate_win_probability(&cards("As"), &[], 1, 1000),
            Err(EquityError::InvalidHandSize(1))
        );
        assert_eq!(
            estimate_win_probability(&cards("As Ah Ad"), &[], 1, 1000),
            Err(EquityError::InvalidHandSize(3))
        );
        assert_eq!(
            estimate_win_probability(&aces, &cards("2c 3c 4c 5c 6c 7c"), 1, 1000),
            Err(EquityError::TooManyBoardCards(6))
        );
        assert_eq!(
            estimate_win_probability(&aces, &[], 10, 1000),
            Err(EquityError::TooManyOpponents { got: 10, max: 9 })
        );
        assert_eq!(
            estimate_win_probability(&aces, &[], 1, 999),
            Err(EquityError::TooFewIterations { got: 999, min: 1000 })
        );
        assert_eq!(
            estimate_win_probability(&aces, &cards("Kd As"), 1, 1000),
            Err(EquityError::DuplicateCard("As".parse().unwrap()))
        );
    }

    #[test]
    fn config_thresholds() {
        let loose = EstimateConfig::default().with_min_iterations(10).with_max_opponents(12);
        let r = estimate_win_probability_with_config(&cards("As Ah"), &[], 12, 10, &loose).unwrap();
        assert_eq!(r.iterations, 10);

        // capped by what one deck can deal
        let silly = EstimateConfig::default().with_max_opponents(40);
        assert_eq!(
            estimate_win_probability_with_config(&cards("As Ah"), &[], 23, 1000, &silly),
            Err(EquityError::TooManyOpponents { got: 23, max: 22 })
        );

        let zero = EstimateConfig::default().with_min_iterations(0);
        assert_eq!(
            estimate_win_probability_with_config(&cards("As Ah"), &[], 1, 0, &zero),
            Err(EquityError::TooFewIterations { got: 0, min: 1 })
        );
    }

    #[test]
    fn result_display() {
        let r = HandResult::from_counts(EquityCounts { win: 3, tie: 1, loss: 0 }, 4);
        assert_eq!(
            r.to_string(),
            "Win: 75.00%, Tie: 25.00%, Loss: 0.00%, Win+Tie: 100.00% (from 4 iterations)"
        );
    }
}
