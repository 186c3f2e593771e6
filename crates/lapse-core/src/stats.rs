//! Aggregate outcome statistics
//!
//! Summaries the surrounding product derives from outcome streams - the
//! running success-rate series shown after a session, and a Beta summary of
//! overall performance. Chart rendering stays with the presentation layer;
//! these are just the numbers behind it.

use crate::model::SUCCESS_THRESHOLD;
use crate::scheduling::{BetaPosterior, BetaPrior};

/// Map a 0-10 review rating to the boolean outcome recorded in the
/// learner's recall history.
pub fn outcome_from_rating(rating: u8) -> bool {
    rating >= SUCCESS_THRESHOLD
}

/// Running success rate after each outcome: element `i` is the share of
/// successes among the first `i + 1` outcomes.
pub fn cumulative_success_rates(outcomes: &[bool]) -> Vec<f64> {
    let mut successes = 0usize;
    outcomes
        .iter()
        .enumerate()
        .map(|(i, &success)| {
            if success {
                successes += 1;
            }
            successes as f64 / (i + 1) as f64
        })
        .collect()
}

/// Beta summary of a whole outcome stream, on the optimistic (2,1) prior
/// used for learner-level performance.
pub fn outcome_posterior(outcomes: &[bool]) -> BetaPosterior {
    let successes = outcomes.iter().filter(|&&s| s).count();
    BetaPosterior::from_counts(BetaPrior::SUCCESS_RATE, successes, outcomes.len() - successes)
}
