//! # Lapse Core
//!
//! Adaptive spaced-repetition scheduling engine. Instead of a fixed
//! ease-factor formula, scheduling is posterior-driven per card:
//!
//! - **Recall posterior**: Beta-Binomial belief over each card's true
//!   recall probability, updated from its 0-10 rating history
//! - **Adaptive decay**: the forgetting rate is recalibrated from the
//!   trajectory of recent outcomes (drops, spaced improvements, maturity)
//! - **Monte-Carlo intervals**: thousands of sampled forgetting curves are
//!   solved for "time until recall hits the target", summarized at a
//!   randomized percentile so co-scheduled cards spread out
//! - **Learner calibration**: a windowed success-rate posterior stretches or
//!   compresses intervals toward a target performance level
//! - **Per-pass selection**: urgency-pooled, repeat-capped next-card choice
//!   scoped to one study pass
//!
//! Persistence, transport, and rendering are external collaborators; the
//! engine only reads immutable snapshots and performs synchronous CPU-bound
//! work. Every randomized operation has a `*_with_rng` / `*_at` form taking
//! an explicit generator and clock for reproducibility.
//!
//! ## Quick Start
//!
//! ```rust
//! use lapse_core::prelude::*;
//!
//! let profile = UserProfileSnapshot::default();
//! let card = CardSnapshot::new(chrono::Utc::now());
//!
//! // Predict when the card should come back
//! let prediction = predict_next_interval(&card, &profile, SamplerConfig::default())?;
//!
//! // Calibrate against the learner's recent performance
//! let posterior = user_success_posterior(&profile, DEFAULT_SUCCESS_WINDOW, SUCCESS_RATE_PRIOR);
//! let minutes = calibrate_interval(prediction.minutes, &posterior, CalibrationConfig::default())?;
//! println!("next review in {}", format_interval(minutes));
//!
//! // Drive a study pass
//! let mut pass = CardScheduler::new(profile, vec![card]);
//! let next = pass.select_next(SelectionOptions::default());
//! assert!(next.is_some());
//! # Ok::<(), lapse_core::ScheduleError>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod format;
pub mod model;
pub mod scheduling;
pub mod selection;
pub mod stats;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Snapshot types
pub use model::{
    CardSnapshot, RecallOutcome, ReviewRecord, UserProfileSnapshot, RATING_MAX, SUCCESS_THRESHOLD,
};

// Scheduling estimators
pub use scheduling::{
    calibrate_interval, calibrate_interval_with_rng, estimate_decay, predict_next_interval,
    predict_next_interval_at, recall_posterior, user_success_posterior, BetaPosterior, BetaPrior,
    CalibrationConfig, IntervalPrediction, Result, SamplerConfig, ScheduleError,
    DEFAULT_DECAY_WINDOW, DEFAULT_SUCCESS_WINDOW, MIN_DECAY, SUCCESS_RATE_PRIOR,
};

// Per-pass selection
pub use selection::{CardScheduler, SelectionOptions};

// Presentation helper
pub use format::format_interval;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::format::format_interval;
    pub use crate::model::{CardSnapshot, RecallOutcome, ReviewRecord, UserProfileSnapshot};
    pub use crate::scheduling::{
        calibrate_interval, estimate_decay, predict_next_interval, recall_posterior,
        user_success_posterior, BetaPosterior, BetaPrior, CalibrationConfig, IntervalPrediction,
        SamplerConfig, ScheduleError, DEFAULT_DECAY_WINDOW, DEFAULT_SUCCESS_WINDOW,
        SUCCESS_RATE_PRIOR,
    };
    pub use crate::selection::{CardScheduler, SelectionOptions};
}
