//! Adaptive scheduling engine
//!
//! Four pure, stateless estimators that together turn a card's history into
//! a concrete next-review interval:
//!
//! 1. [`recall_posterior`] - Beta-Binomial belief over the card's true
//!    recall probability
//! 2. [`estimate_decay`] - adaptive forgetting rate from the recent
//!    rating/timing trajectory
//! 3. [`predict_next_interval`] - Monte-Carlo solve of the forgetting curve
//!    for "time until recall falls to the target"
//! 4. [`user_success_posterior`] / [`calibrate_interval`] - learner-level
//!    performance estimate and interval correction toward a target success
//!    rate
//!
//! All estimators are synchronous, CPU-bound, and safe to call concurrently
//! as long as each caller owns its random generator. Every randomized
//! operation has a `*_with_rng` form taking an explicit [`rand::Rng`] for
//! reproducibility.

mod calibration;
mod decay;
mod posterior;
mod sampler;

pub use calibration::{
    calibrate_interval, calibrate_interval_with_rng, user_success_posterior, CalibrationConfig,
    DEFAULT_SUCCESS_WINDOW, SUCCESS_RATE_PRIOR,
};
pub use decay::{
    estimate_decay, CONSOLIDATION_FACTOR, DEFAULT_DECAY_WINDOW, DROP_PENALTY_SCALE,
    MATURITY_DECAY_FACTOR, MATURITY_STREAK_THRESHOLD, MIN_DECAY, SAME_SITTING_MINUTES,
};
pub use posterior::{recall_posterior, BetaPosterior, BetaPrior};
pub use sampler::{
    predict_next_interval, predict_next_interval_at, IntervalPrediction, SamplerConfig,
};

use thiserror::Error;

use crate::model::RATING_MAX;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors produced by the scheduling estimators.
///
/// Estimators validate eagerly and never return a partially computed result.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// A review rating falls outside the 0-10 scale.
    #[error("rating {0} outside the 0-{RATING_MAX} scale")]
    InvalidRating(u8),

    /// A Monte-Carlo operation was asked for zero samples; a percentile of
    /// an empty sample set is undefined.
    #[error("sample count must be positive")]
    InvalidSampleCount,

    /// A lookback window of zero entries carries no signal.
    #[error("lookback window must be positive")]
    InvalidWindow,

    /// Beta parameters degenerated to a non-positive value. Unreachable when
    /// priors are >= 1, kept as a guard rather than a panic.
    #[error("posterior parameters must be strictly positive (alpha={alpha}, beta={beta})")]
    InvalidPosterior {
        /// Offending alpha
        alpha: f64,
        /// Offending beta
        beta: f64,
    },
}

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Reject ratings off the 0-10 scale before any estimator consumes them.
pub(crate) fn ensure_valid_rating(rating: u8) -> Result<()> {
    if rating > RATING_MAX {
        return Err(ScheduleError::InvalidRating(rating));
    }
    Ok(())
}
