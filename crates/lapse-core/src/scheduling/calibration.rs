//! Learner-level success-rate estimation and interval calibration
//!
//! Card posteriors capture one card; this captures the learner. A windowed
//! Beta posterior over recent outcomes (any card, any deck) summarizes
//! short-term performance, and [`calibrate_interval`] nudges a candidate
//! interval toward or away from a target success rate: outperformers get
//! stretched intervals, underperformers get compressed ones.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::posterior::{BetaPosterior, BetaPrior};
use super::Result;
use crate::model::UserProfileSnapshot;

/// How many recent outcomes the success-rate posterior looks at by default.
pub const DEFAULT_SUCCESS_WINDOW: usize = 30;

/// Prior for learner success-rate estimation: one pseudo-success of
/// optimism so a brand-new learner is not assumed to be failing.
pub const SUCCESS_RATE_PRIOR: BetaPrior = BetaPrior::SUCCESS_RATE;

// ============================================================================
// SUCCESS-RATE POSTERIOR
// ============================================================================

/// Estimate the learner's short-term success rate from the last `window`
/// outcomes in the profile's recall history.
pub fn user_success_posterior(
    profile: &UserProfileSnapshot,
    window: usize,
    prior: BetaPrior,
) -> BetaPosterior {
    let start = profile.recall_history.len().saturating_sub(window);
    let recent = &profile.recall_history[start..];
    let successes = recent.iter().filter(|o| o.success).count();
    let failures = recent.len() - successes;
    BetaPosterior::from_counts(prior, successes, failures)
}

// ============================================================================
// INTERVAL CALIBRATION
// ============================================================================

/// Tuning knobs for interval calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationConfig {
    /// Success rate the learner is being held to
    pub target: f64,
    /// How strongly deviation from target moves the interval
    pub sensitivity: f64,
    /// Monte-Carlo sample count for the posterior mean
    pub sample_count: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            target: 0.8,
            sensitivity: 0.2,
            sample_count: 1000,
        }
    }
}

/// Rescale a candidate interval against the learner's estimated success
/// rate, using the thread-local generator.
pub fn calibrate_interval(
    minutes: u64,
    posterior: &BetaPosterior,
    config: CalibrationConfig,
) -> Result<u64> {
    calibrate_interval_with_rng(minutes, posterior, config, &mut rand::thread_rng())
}

/// Rescale a candidate interval with an explicit generator.
///
/// Draws `sample_count` success-rate hypotheses, takes their mean `p`, and
/// applies `1 + sensitivity * (p - target)` to the interval, floored at one
/// minute.
pub fn calibrate_interval_with_rng<R: Rng + ?Sized>(
    minutes: u64,
    posterior: &BetaPosterior,
    config: CalibrationConfig,
    rng: &mut R,
) -> Result<u64> {
    let samples = posterior.sample_with_rng(rng, config.sample_count)?;
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let correction = 1.0 + config.sensitivity * (mean - config.target);
    let calibrated = (minutes as f64 * correction).max(1.0).round() as u64;
    tracing::debug!(minutes, mean, correction, calibrated, "interval calibrated");
    Ok(calibrated)
}
