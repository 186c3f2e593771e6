//! Adaptive forgetting-rate estimation
//!
//! Instead of a single per-card ease value, the forgetting rate is
//! recalibrated from the trajectory of recent outcomes: rating drops raise
//! it (scaled by how long the card survived before dropping), improvements
//! spaced beyond one sitting lower it slightly, and a long maturity streak
//! lowers it strongly. The result feeds the exponential curve
//! `p(t) = p0 * e^(-decay * t)` in the interval sampler.

use super::{ensure_valid_rating, Result, ScheduleError};
use crate::model::{CardSnapshot, ReviewRecord, UserProfileSnapshot};

// ============================================================================
// TUNING CONSTANTS
// ============================================================================

/// Hard floor for the decay rate; the curve never flattens completely.
pub const MIN_DECAY: f64 = 0.001;

/// How many most-recent reviews the trajectory looks at by default.
pub const DEFAULT_DECAY_WINDOW: usize = 5;

/// Divisor for the rating-drop penalty `|delta| * elapsed_minutes / scale`.
pub const DROP_PENALTY_SCALE: f64 = 10_000.0;

/// Multiplier applied per spaced rating improvement.
pub const CONSOLIDATION_FACTOR: f64 = 0.97;

/// Improvements within this many minutes of the previous review count as
/// the same sitting and earn no consolidation bonus.
pub const SAME_SITTING_MINUTES: f64 = 10.0;

/// Streak length beyond which the maturity bonus kicks in.
pub const MATURITY_STREAK_THRESHOLD: u32 = 3;

/// Multiplier applied once when the streak exceeds the threshold.
pub const MATURITY_DECAY_FACTOR: f64 = 0.6;

// ============================================================================
// ESTIMATION
// ============================================================================

/// Estimate a card's forgetting rate.
///
/// Starts from `base_override` when given, otherwise the profile's
/// `global_decay`. Cards with fewer than two reviews return the baseline
/// unchanged - one data point is not a trajectory. The result is always at
/// least [`MIN_DECAY`].
pub fn estimate_decay(
    card: &CardSnapshot,
    profile: &UserProfileSnapshot,
    base_override: Option<f64>,
    window: usize,
) -> Result<f64> {
    if window == 0 {
        return Err(ScheduleError::InvalidWindow);
    }
    for rating in card.ratings() {
        ensure_valid_rating(rating)?;
    }

    let base = base_override.unwrap_or(profile.global_decay);
    if card.review_count() < 2 {
        return Ok(base.max(MIN_DECAY));
    }

    // Snapshots arrive ordered, but the estimate must not depend on it.
    let mut recent: Vec<ReviewRecord> = card.reviews.clone();
    recent.sort_by_key(|r| r.timestamp);
    let start = recent.len().saturating_sub(window);
    let recent = &recent[start..];

    let mut decay = base;
    for pair in recent.windows(2) {
        let elapsed_minutes = ((pair[1].timestamp - pair[0].timestamp).num_seconds() as f64) / 60.0;
        let delta = pair[1].rating as i32 - pair[0].rating as i32;
        if delta < 0 {
            // Forgetting: sharper penalty the longer the card survived first
            decay += delta.unsigned_abs() as f64 * elapsed_minutes / DROP_PENALTY_SCALE;
        } else if delta > 0 && elapsed_minutes > SAME_SITTING_MINUTES {
            // Spaced improvement: mild consolidation. Rapid re-reviews in the
            // same sitting earn nothing, cramming is not consolidation.
            decay *= CONSOLIDATION_FACTOR;
        }
    }

    if card.mature_streak > MATURITY_STREAK_THRESHOLD {
        decay *= MATURITY_DECAY_FACTOR;
    }

    let decay = decay.max(MIN_DECAY);
    tracing::debug!(card = %card.id, base, decay, "adaptive decay estimated");
    Ok(decay)
}
