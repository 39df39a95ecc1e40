use super::common::*;
use crate::workflows::lending::domain::{Recommendation, RiskBand};

#[test]
fn full_ceiling_request_scores_high_risk() {
    let assessment = engine().assess_risk(1500.0, 1500.0);

    assert_eq!(assessment.score, 35);
    assert_eq!(assessment.label, RiskBand::High);
    assert_eq!(assessment.recommendation, Recommendation::No);
}

#[test]
fn small_request_scores_low_risk() {
    let assessment = engine().assess_risk(150.0, 1500.0);

    assert_eq!(assessment.score, 89);
    assert_eq!(assessment.label, RiskBand::Low);
    assert_eq!(assessment.recommendation, Recommendation::Yes);
}

#[test]
fn low_band_starts_at_score_seventy() {
    let assessment = engine().assess_risk(625.0, 1500.0);

    assert_eq!(assessment.score, 70);
    assert_eq!(assessment.label, RiskBand::Low);
    assert_eq!(assessment.recommendation, Recommendation::Yes);
}

#[test]
fn moderate_band_starts_at_score_forty_five() {
    let assessment = engine().assess_risk(1250.0, 1500.0);

    assert_eq!(assessment.score, 45);
    assert_eq!(assessment.label, RiskBand::Med);
    assert_eq!(assessment.recommendation, Recommendation::Maybe);
}

#[test]
fn zero_ceiling_collapses_to_unit_ratio() {
    let assessment = engine().assess_risk(800.0, 0.0);

    assert_eq!(assessment.score, 35);
    assert_eq!(assessment.label, RiskBand::High);
}

#[test]
fn runaway_requests_bottom_out_at_the_ratio_clamp() {
    let engine = engine();
    let at_clamp = engine.assess_risk(1800.0, 1500.0);
    let beyond_clamp = engine.assess_risk(1_000_000.0, 1500.0);

    assert_eq!(at_clamp.score, beyond_clamp.score);
    assert_eq!(at_clamp.score, 23);
}

#[test]
fn score_stays_within_bounds() {
    let engine = engine();
    for step in 0..=200 {
        let requested = step as f64 * 25.0;
        let assessment = engine.assess_risk(requested, 1500.0);
        assert!(
            (5..=95).contains(&assessment.score),
            "score {} out of bounds for request {requested}",
            assessment.score
        );
    }
}

#[test]
fn score_never_increases_with_the_requested_amount() {
    let engine = engine();
    let mut previous = u8::MAX;
    for step in 0..=120 {
        let requested = step as f64 * 25.0;
        let score = engine.assess_risk(requested, 1500.0).score;
        assert!(
            score <= previous,
            "score rose from {previous} to {score} at request {requested}"
        );
        previous = score;
    }
}

#[test]
fn explanation_references_amount_and_band() {
    let assessment = engine().assess_risk(1500.0, 1500.0);

    assert!(assessment.explanation.contains("$1500"));
    assert!(assessment.explanation.contains("high"));
}
