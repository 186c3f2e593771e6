//! End-to-end scenarios across the scheduling pipeline: estimate, predict,
//! calibrate, select.

use chrono::{DateTime, Duration, TimeZone, Utc};
use lapse_core::prelude::*;
use lapse_core::{estimate_decay, DEFAULT_DECAY_WINDOW};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 7, 30, 0).unwrap()
}

fn card_with(reviews: &[(i64, u8)]) -> CardSnapshot {
    let mut card = CardSnapshot::new(t0());
    for &(offset_min, rating) in reviews {
        card.reviews.push(ReviewRecord::new(
            t0() + Duration::minutes(offset_min),
            rating,
        ));
    }
    card
}

fn profile_with(global_decay: f64, outcomes: &[bool]) -> UserProfileSnapshot {
    let mut profile = UserProfileSnapshot {
        global_decay,
        recall_history: Vec::new(),
    };
    for &success in outcomes {
        profile.push_outcome("study", success);
    }
    profile
}

#[test]
fn struggling_card_is_scheduled_sooner_than_solid_card() {
    let profile = profile_with(0.01, &[]);
    let now = t0() + Duration::days(2);

    let struggling = card_with(&[(0, 8), (600, 3), (1200, 4)]);
    let solid = card_with(&[(0, 8), (600, 9), (1200, 9)]);

    let median = |card: &CardSnapshot| {
        let mut minutes: Vec<u64> = (0..31)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                lapse_core::predict_next_interval_at(
                    card,
                    &profile,
                    SamplerConfig::default(),
                    now,
                    &mut rng,
                )
                .unwrap()
                .minutes
            })
            .collect();
        minutes.sort_unstable();
        minutes[minutes.len() / 2]
    };

    assert!(median(&struggling) < median(&solid));
}

#[test]
fn decay_scenario_from_rating_drop() {
    // [(t0, 9), (t0+5min, 3)] on a 0.01 baseline: the drop of 6 over five
    // minutes adds 6*5/10000 = 0.003
    let card = card_with(&[(0, 9), (5, 3)]);
    let profile = profile_with(0.01, &[]);
    let decay = estimate_decay(&card, &profile, None, DEFAULT_DECAY_WINDOW).unwrap();
    assert!((decay - 0.013).abs() < 1e-12);
}

#[test]
fn predict_then_calibrate_pipeline() {
    // Learner slightly under the 0.8 target: calibration should shave the
    // predicted interval a little, never below one minute
    let mut outcomes = vec![true; 8];
    outcomes.extend([false; 2]);
    let profile = profile_with(0.01, &outcomes);
    let posterior = user_success_posterior(&profile, DEFAULT_SUCCESS_WINDOW, SUCCESS_RATE_PRIOR);
    assert_eq!((posterior.alpha, posterior.beta), (10.0, 3.0));

    let card = card_with(&[(0, 8), (600, 9), (1200, 8), (1800, 9)]);
    let mut rng = StdRng::seed_from_u64(17);
    let prediction = lapse_core::predict_next_interval_at(
        &card,
        &profile,
        SamplerConfig::default(),
        t0() + Duration::days(3),
        &mut rng,
    )
    .unwrap();
    assert!(prediction.minutes >= 1);

    let calibrated = lapse_core::calibrate_interval_with_rng(
        prediction.minutes,
        &posterior,
        CalibrationConfig::default(),
        &mut rng,
    )
    .unwrap();
    assert!(calibrated >= 1);
    // Correction for a (10,3) posterior sits within ~1% of unity
    let ratio = calibrated as f64 / prediction.minutes as f64;
    assert!((0.97..=1.03).contains(&ratio), "ratio {ratio}");
}

#[test]
fn study_pass_drains_a_small_deck() {
    let profile = profile_with(0.01, &[]);
    let cards: Vec<CardSnapshot> = (0..4).map(|_| CardSnapshot::new(t0())).collect();
    let ids: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();

    let mut pass = CardScheduler::new(profile, cards);
    let mut rng = StdRng::seed_from_u64(23);
    let options = SelectionOptions::default();

    // 8 draws exhaust every cap (4 cards x 2 reviews)
    for _ in 0..8 {
        assert!(pass.select_next_at(options, t0(), &mut rng).is_some());
    }
    for id in &ids {
        assert_eq!(pass.times_selected(id), options.max_reviews_per_card);
    }
}

#[test]
fn formatted_interval_reads_naturally() {
    let profile = profile_with(0.002, &[]);
    let card = card_with(&[(0, 9), (1600, 9), (3200, 10)]);
    let mut rng = StdRng::seed_from_u64(31);
    let prediction = lapse_core::predict_next_interval_at(
        &card,
        &profile,
        SamplerConfig::default(),
        t0() + Duration::days(10),
        &mut rng,
    )
    .unwrap();
    let text = format_interval(prediction.minutes);
    assert!(
        text.ends_with("minutes") || text.ends_with("hours") || text.contains("days"),
        "unexpected format: {text}"
    );
}
