//! Beta-Binomial posterior over a card's true recall probability
//!
//! Each review is treated as a Bernoulli trial (success = rating >= 7).
//! Starting from a Beta prior, counting successes and failures yields the
//! posterior in closed form: `Beta(alpha0 + successes, beta0 + failures)`.
//! With the default uniform prior (1,1) an empty history stays uniform,
//! which is exactly the "we know nothing about this card" belief the
//! Monte-Carlo sampler wants.

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use super::{ensure_valid_rating, Result, ScheduleError};
use crate::model::CardSnapshot;

// ============================================================================
// PRIOR / POSTERIOR
// ============================================================================

/// Prior belief expressed as Beta pseudo-counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaPrior {
    /// Pseudo-successes
    pub alpha: f64,
    /// Pseudo-failures
    pub beta: f64,
}

impl BetaPrior {
    /// Uniform prior - no opinion about recall probability.
    pub const UNIFORM: Self = Self {
        alpha: 1.0,
        beta: 1.0,
    };

    /// Mildly optimistic prior used for learner-level success-rate
    /// estimation (one extra pseudo-success).
    pub const SUCCESS_RATE: Self = Self {
        alpha: 2.0,
        beta: 1.0,
    };
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::UNIFORM
    }
}

/// Posterior belief over an unknown probability, as Beta parameters.
///
/// Invariant: both parameters are at least their prior values, so they are
/// always valid (strictly positive) Beta parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaPosterior {
    /// Prior alpha plus observed successes
    pub alpha: f64,
    /// Prior beta plus observed failures
    pub beta: f64,
}

impl BetaPosterior {
    /// Fold observed success/failure counts into a prior.
    pub fn from_counts(prior: BetaPrior, successes: usize, failures: usize) -> Self {
        Self {
            alpha: prior.alpha + successes as f64,
            beta: prior.beta + failures as f64,
        }
    }

    /// Posterior mean, `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior variance, `alpha*beta / ((alpha+beta)^2 (alpha+beta+1))`.
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Draw `n` independent samples from the posterior.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        if n == 0 {
            return Err(ScheduleError::InvalidSampleCount);
        }
        let dist = self.distribution()?;
        Ok((0..n).map(|_| dist.sample(rng)).collect())
    }

    pub(crate) fn distribution(&self) -> Result<Beta<f64>> {
        Beta::new(self.alpha, self.beta).map_err(|_| ScheduleError::InvalidPosterior {
            alpha: self.alpha,
            beta: self.beta,
        })
    }
}

// ============================================================================
// RECALL POSTERIOR
// ============================================================================

/// Estimate the posterior over a card's true recall probability from its
/// rating history.
///
/// An empty history returns the prior unchanged. Ratings outside the 0-10
/// scale are rejected before any counting happens.
pub fn recall_posterior(card: &CardSnapshot, prior: BetaPrior) -> Result<BetaPosterior> {
    for rating in card.ratings() {
        ensure_valid_rating(rating)?;
    }
    let successes = card.reviews.iter().filter(|r| r.is_success()).count();
    let failures = card.review_count() - successes;
    Ok(BetaPosterior::from_counts(prior, successes, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewRecord;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card_with_ratings(ratings: &[u8]) -> CardSnapshot {
        let added = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut card = CardSnapshot::new(added);
        for (i, &rating) in ratings.iter().enumerate() {
            card.reviews.push(ReviewRecord::new(
                added + chrono::Duration::minutes(i as i64),
                rating,
            ));
        }
        card
    }

    #[test]
    fn empty_history_returns_prior() {
        let card = card_with_ratings(&[]);
        let post = recall_posterior(&card, BetaPrior::UNIFORM).unwrap();
        assert_eq!(post.alpha, 1.0);
        assert_eq!(post.beta, 1.0);
    }

    #[test]
    fn counts_successes_and_failures() {
        let card = card_with_ratings(&[9, 7, 3, 10, 0, 6]);
        let post = recall_posterior(&card, BetaPrior::UNIFORM).unwrap();
        assert_eq!(post.alpha, 1.0 + 3.0);
        assert_eq!(post.beta, 1.0 + 3.0);
    }

    #[test]
    fn parameter_mass_equals_prior_plus_history_len() {
        for ratings in [&[][..], &[10][..], &[0, 7, 7, 2, 5, 9, 9][..]] {
            let card = card_with_ratings(ratings);
            let post = recall_posterior(&card, BetaPrior::UNIFORM).unwrap();
            assert_eq!(post.alpha + post.beta, 2.0 + ratings.len() as f64);
            let successes = ratings.iter().filter(|&&r| r >= 7).count();
            assert_eq!(post.alpha - 1.0, successes as f64);
        }
    }

    #[test]
    fn out_of_scale_rating_is_rejected() {
        let card = card_with_ratings(&[5, 11]);
        assert_eq!(
            recall_posterior(&card, BetaPrior::UNIFORM),
            Err(ScheduleError::InvalidRating(11))
        );
    }

    #[test]
    fn mean_and_variance_match_closed_form() {
        let post = BetaPosterior {
            alpha: 10.0,
            beta: 3.0,
        };
        assert!((post.mean() - 10.0 / 13.0).abs() < 1e-12);
        assert!((post.variance() - 30.0 / (169.0 * 14.0)).abs() < 1e-12);
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let post = BetaPosterior {
            alpha: 4.0,
            beta: 2.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let samples = post.sample_with_rng(&mut rng, 500).unwrap();
        assert_eq!(samples.len(), 500);
        assert!(samples.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn zero_samples_is_an_input_error() {
        let post = BetaPosterior {
            alpha: 1.0,
            beta: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            post.sample_with_rng(&mut rng, 0),
            Err(ScheduleError::InvalidSampleCount)
        );
    }
}
