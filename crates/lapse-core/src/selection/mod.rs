//! Per-pass next-card selection
//!
//! One [`CardScheduler`] serves one study pass over a fixed candidate set.
//! Candidates are partitioned into urgency pools - cards failed recently or
//! not yet mature come first, a trickle of brand-new and mature cards is
//! mixed in - and the next card is drawn uniformly from a capped backlog.
//! Per-card repeat caps are the only state, created at pass start and
//! discarded with the scheduler.
//!
//! The scheduler is deliberately not shareable between passes: counters are
//! `&mut self`, so exclusive ownership per pass is enforced by the borrow
//! checker rather than locks.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{CardSnapshot, UserProfileSnapshot};

// ============================================================================
// POOL TUNING
// ============================================================================

/// A card failed within this many hours stays in the urgent pool even if
/// the store already marked it mature.
pub const WRONG_RECENCY_HOURS: i64 = 48;

/// At most this many never-reviewed cards enter one backlog.
pub const NEW_POOL_LIMIT: usize = 3;

/// At most this many mature cards enter one backlog.
pub const MATURE_POOL_LIMIT: usize = 5;

/// Per-call limits for [`CardScheduler::select_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOptions {
    /// Maximum backlog considered in one selection
    pub backlog_limit: usize,
    /// How often one card may be shown per pass (soft cap, see fallback)
    pub max_reviews_per_card: u32,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            backlog_limit: 50,
            max_reviews_per_card: 2,
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Stateful next-card selector for one study pass.
#[derive(Debug, Clone)]
pub struct CardScheduler {
    profile: UserProfileSnapshot,
    cards: Vec<CardSnapshot>,
    selected: HashMap<String, u32>,
}

impl CardScheduler {
    /// Start a pass over a fixed candidate set. All per-pass counters begin
    /// at zero.
    pub fn new(profile: UserProfileSnapshot, cards: Vec<CardSnapshot>) -> Self {
        let selected = cards.iter().map(|c| (c.id.clone(), 0)).collect();
        Self {
            profile,
            cards,
            selected,
        }
    }

    /// The learner profile this pass was opened for.
    pub fn profile(&self) -> &UserProfileSnapshot {
        &self.profile
    }

    /// The full candidate set of this pass.
    pub fn cards(&self) -> &[CardSnapshot] {
        &self.cards
    }

    /// How often a card has been selected in this pass.
    pub fn times_selected(&self, card_id: &str) -> u32 {
        self.selected.get(card_id).copied().unwrap_or(0)
    }

    /// Pick the next card to show, using the current time and the
    /// thread-local generator. `None` means the candidate set is empty.
    pub fn select_next(&mut self, options: SelectionOptions) -> Option<&CardSnapshot> {
        let now = Utc::now();
        self.select_next_at(options, now, &mut rand::thread_rng())
    }

    /// Pick the next card with an explicit clock and generator.
    ///
    /// Cards already at `max_reviews_per_card` are excluded; the remainder
    /// is pooled into urgent / new / mature, shuffled per pool, and capped
    /// at `backlog_limit` with urgent cards surviving truncation first. If
    /// every candidate is capped, the cap is overridden as a last resort
    /// rather than stalling the pass.
    pub fn select_next_at<R: Rng + ?Sized>(
        &mut self,
        options: SelectionOptions,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<&CardSnapshot> {
        let mut urgent: Vec<usize> = Vec::new();
        let mut new: Vec<usize> = Vec::new();
        let mut mature: Vec<usize> = Vec::new();

        for (idx, card) in self.cards.iter().enumerate() {
            if self.times_selected(&card.id) >= options.max_reviews_per_card {
                continue;
            }
            if card.review_count() == 0 {
                new.push(idx);
            } else if !card.is_mature || wrong_recently(card, now) {
                urgent.push(idx);
            } else {
                mature.push(idx);
            }
        }

        urgent.shuffle(rng);
        new.shuffle(rng);
        mature.shuffle(rng);
        tracing::debug!(
            urgent = urgent.len(),
            new = new.len(),
            mature = mature.len(),
            "selection pools built"
        );

        // Urgent first, then a trickle of new and mature. Truncation drops
        // from the end, so new/mature entries go before urgent ones.
        let mut backlog: Vec<usize> = Vec::new();
        backlog.extend(urgent.iter().take(options.backlog_limit));
        backlog.extend(new.iter().take(NEW_POOL_LIMIT));
        backlog.extend(mature.iter().take(MATURE_POOL_LIMIT));
        backlog.truncate(options.backlog_limit);

        if let Some(&idx) = backlog.choose(rng) {
            return Some(self.mark_selected(idx));
        }

        // Everything pooled away: retry among any candidate still under its
        // cap, then - last resort - the whole set, cap or not.
        let under_cap: Vec<usize> = (0..self.cards.len())
            .filter(|&idx| {
                self.times_selected(&self.cards[idx].id) < options.max_reviews_per_card
            })
            .collect();
        if let Some(&idx) = under_cap.choose(rng) {
            return Some(self.mark_selected(idx));
        }
        if self.cards.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.cards.len());
        Some(self.mark_selected(idx))
    }

    fn mark_selected(&mut self, idx: usize) -> &CardSnapshot {
        let card = &self.cards[idx];
        *self.selected.entry(card.id.clone()).or_insert(0) += 1;
        card
    }
}

fn wrong_recently(card: &CardSnapshot, now: DateTime<Utc>) -> bool {
    card.last_wrong_at
        .is_some_and(|at| now - at < Duration::hours(WRONG_RECENCY_HOURS))
}
