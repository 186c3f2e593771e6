//! Card and learner snapshots - the read-only inputs to the scheduling engine
//!
//! The engine never owns or mutates study data. The persistence layer hands
//! it immutable snapshots per call:
//! - [`CardSnapshot`]: one card with its ordered review history and the
//!   maturity flags the store maintains
//! - [`UserProfileSnapshot`]: the learner's baseline forgetting rate and
//!   recent outcome history
//!
//! The 0-10 rating scale and the success threshold live here as named
//! constants so every component shares one definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// RATING SCALE
// ============================================================================

/// Upper bound of the review rating scale (inclusive).
pub const RATING_MAX: u8 = 10;

/// Ratings at or above this value count as a successful recall.
pub const SUCCESS_THRESHOLD: u8 = 7;

// ============================================================================
// REVIEW
// ============================================================================

/// A single review event for a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// When the review happened
    pub timestamp: DateTime<Utc>,
    /// Self-reported recall quality, 0 (blank) to 10 (instant)
    pub rating: u8,
}

impl ReviewRecord {
    /// Create a review at a given time.
    pub fn new(timestamp: DateTime<Utc>, rating: u8) -> Self {
        Self { timestamp, rating }
    }

    /// Whether this review counts as a successful recall.
    pub fn is_success(&self) -> bool {
        self.rating >= SUCCESS_THRESHOLD
    }
}

// ============================================================================
// CARD SNAPSHOT
// ============================================================================

/// Read-only view of one card as supplied by the store.
///
/// `is_mature`, `mature_streak` and `last_wrong_at` are derived and
/// maintained by the persistence collaborator; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Review history, ascending by timestamp
    pub reviews: Vec<ReviewRecord>,
    /// Whether the store considers this card mature
    pub is_mature: bool,
    /// Consecutive successful reviews
    pub mature_streak: u32,
    /// Most recent failed review, if any
    pub last_wrong_at: Option<DateTime<Utc>>,
    /// When the card was added to its deck
    pub added_at: DateTime<Utc>,
}

impl CardSnapshot {
    /// Create a fresh card with no history, added at `added_at`.
    pub fn new(added_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reviews: Vec::new(),
            is_mature: false,
            mature_streak: 0,
            last_wrong_at: None,
            added_at,
        }
    }

    /// Number of reviews recorded for this card.
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// The raw ratings in history order.
    pub fn ratings(&self) -> impl Iterator<Item = u8> + '_ {
        self.reviews.iter().map(|r| r.rating)
    }

    /// Minutes elapsed since the card was added, floored at zero.
    pub fn age_minutes(&self, now: DateTime<Utc>) -> f64 {
        ((now - self.added_at).num_seconds().max(0) as f64) / 60.0
    }
}

// ============================================================================
// LEARNER PROFILE
// ============================================================================

/// One recall outcome in the learner's aggregate history.
///
/// The context string is opaque to the engine; the store uses it to tag
/// where the outcome came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallOutcome {
    /// Opaque origin tag
    pub context: String,
    /// Whether the recall succeeded
    pub success: bool,
}

/// Read-only view of the learner's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileSnapshot {
    /// Baseline forgetting rate used when a card has too little history
    /// to adapt from. Strictly positive.
    pub global_decay: f64,
    /// Recent recall outcomes, ascending by time
    pub recall_history: Vec<RecallOutcome>,
}

impl Default for UserProfileSnapshot {
    fn default() -> Self {
        Self {
            global_decay: 0.01,
            recall_history: Vec::new(),
        }
    }
}

impl UserProfileSnapshot {
    /// Record an outcome at the end of the history.
    pub fn push_outcome(&mut self, context: impl Into<String>, success: bool) {
        self.recall_history.push(RecallOutcome {
            context: context.into(),
            success,
        });
    }
}
