//! Monte-Carlo next-interval prediction
//!
//! Each Beta draw p0 is a hypothesis about the card's present recall
//! probability. Solving `p(t) = p0 * e^(-decay * t)` for `p(t) = target`
//! gives one sampled wait time; draws already at or below target get the
//! one-minute floor. The sampled distribution is stretched for card age and
//! maturity, and the returned interval is a *randomized* percentile of it -
//! the jitter keeps cards reviewed together from clumping on identical
//! future dates.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

use super::decay::{estimate_decay, DEFAULT_DECAY_WINDOW};
use super::posterior::{recall_posterior, BetaPrior};
use super::{Result, ScheduleError};
use crate::model::{CardSnapshot, UserProfileSnapshot};

/// Minimum sampled wait, in minutes.
const FLOOR_MINUTES: f64 = 1.0;

/// The reported interval is drawn from this percentile band of the sample
/// distribution (upper bound exclusive).
const PERCENTILE_BAND: std::ops::Range<f64> = 30.0..80.0;

/// One week, in minutes; each full week of card age adds one unit of
/// interval stretch.
const WEEK_MINUTES: f64 = 60.0 * 24.0 * 7.0;

// ============================================================================
// CONFIG / OUTPUT
// ============================================================================

/// Tuning knobs for the interval sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerConfig {
    /// Recall probability the schedule aims to catch the card at
    pub target_recall: f64,
    /// Monte-Carlo sample count; cost is linear in this
    pub sample_count: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            target_recall: 0.7,
            sample_count: 3000,
        }
    }
}

/// A predicted next-review interval plus the raw sampled wait times it was
/// summarized from (kept for diagnostics and tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalPrediction {
    /// Recommended wait until the next review
    pub minutes: u64,
    /// Per-draw wait times after age stretching, in draw order
    pub samples: Vec<f64>,
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Predict the next-review interval for a card, using the current time and
/// the thread-local generator.
pub fn predict_next_interval(
    card: &CardSnapshot,
    profile: &UserProfileSnapshot,
    config: SamplerConfig,
) -> Result<IntervalPrediction> {
    predict_next_interval_at(card, profile, config, Utc::now(), &mut rand::thread_rng())
}

/// Predict the next-review interval with an explicit clock and generator.
///
/// Same inputs, same seed, same result - this is the form tests and any
/// caller wanting reproducible schedules should use.
pub fn predict_next_interval_at<R: Rng + ?Sized>(
    card: &CardSnapshot,
    profile: &UserProfileSnapshot,
    config: SamplerConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<IntervalPrediction> {
    if config.sample_count == 0 {
        return Err(ScheduleError::InvalidSampleCount);
    }

    let posterior = recall_posterior(card, BetaPrior::UNIFORM)?;
    let decay = estimate_decay(card, profile, None, DEFAULT_DECAY_WINDOW)?;
    let dist = posterior.distribution()?;

    // One unit of stretch per maturity pair, one per full week of card age.
    let age_factor =
        1.0 + (card.mature_streak / 2) as f64 + card.age_minutes(now) / WEEK_MINUTES;

    let mut samples = Vec::with_capacity(config.sample_count);
    for _ in 0..config.sample_count {
        let p0: f64 = dist.sample(rng);
        let wait = if p0 <= config.target_recall {
            // Already at or below target recall
            FLOOR_MINUTES
        } else {
            ((p0 / config.target_recall).ln() / decay).max(FLOOR_MINUTES)
        };
        samples.push(wait * age_factor);
    }

    let threshold = rng.gen_range(PERCENTILE_BAND);
    let minutes = percentile(&samples, threshold).round() as u64;
    tracing::debug!(
        card = %card.id,
        decay,
        age_factor,
        threshold,
        minutes,
        "next-review interval sampled"
    );

    Ok(IntervalPrediction { minutes, samples })
}

/// The q-th percentile of `samples` with linear interpolation between the
/// two nearest order statistics. `samples` must be non-empty.
fn percentile(samples: &[f64], q: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}
