//! Batch evaluation helpers.
//!
//! Evaluate many (hand, board) deals against one shared table. The parallel
//! variants split the slice across the rayon pool; every deal is independent.

use crate::card::Card;
use crate::evaluator::{EvalError, Evaluator};
use crate::rank::HandRank;

/// One deal to evaluate: hole cards plus board, 5..=7 cards combined.
pub type Deal = (Vec<Card>, Vec<Card>);

/// Sequential: rank of every deal, in input order. Stops at the first error.
pub fn evaluate_batch(evaluator: &Evaluator, deals: &[Deal]) -> Result<Vec<HandRank>, EvalError> {
    deals
        .iter()
        .map(|(hand, board)| evaluator.evaluate(hand, board))
        .collect()
}

/// Sequential: evaluate every deal and return the wrapping sum of the ranks.
///
/// Benchmarks use this so the work can't be optimised away without paying
/// for an output vector.
pub fn evaluate_sum(evaluator: &Evaluator, deals: &[Deal]) -> Result<u64, EvalError> {
    deals.iter().try_fold(0u64, |acc, (hand, board)| {
        Ok(acc.wrapping_add(evaluator.evaluate(hand, board)? as u64))
    })
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use rayon::prelude::*;

    /// Parallel: rank of every deal, in input order.
    pub fn evaluate_batch_par(
        evaluator: &Evaluator,
        deals: &[Deal],
    ) -> Result<Vec<HandRank>, EvalError> {
        deals
            .par_iter()
            .map(|(hand, board)| evaluator.evaluate(hand, board))
            .collect()
    }

    pub fn evaluate_sum_par(evaluator: &Evaluator, deals: &[Deal]) -> Result<u64, EvalError> {
        deals
            .par_iter()
            .map(|(hand, board)| evaluator.evaluate(hand, board).map(u64::from))
            .try_reduce(|| 0u64, |a, b| Ok(a.wrapping_add(b)))
    }
}

#[cfg(feature = "parallel")]
pub use par::{evaluate_batch_par, evaluate_sum_par};
