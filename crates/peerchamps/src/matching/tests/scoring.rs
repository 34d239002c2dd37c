use super::common::*;
use crate::matching::scoring::MAX_SCORE;
use crate::matching::{score_advocate, MatchFactor, ScoringConfig};

fn points_for(score: &crate::matching::AdvocateScore, factor: MatchFactor) -> Option<f64> {
    score
        .components
        .iter()
        .find(|component| component.factor == factor)
        .map(|component| component.points)
}

#[test]
fn full_profile_match_lands_in_excellent_band() {
    let score = score_advocate(&advocate("a"), &opportunity(), &ScoringConfig::default());

    assert!(score.value >= 80.0, "score was {}", score.value);
    assert!((score.value - 88.7).abs() < 1e-9);
    assert!(score
        .reasons
        .contains(&"Industry match: Manufacturing".to_string()));
    assert!(score
        .reasons
        .contains(&"Use case match: Process Automation".to_string()));
    assert!(score
        .reasons
        .contains(&"Use case match: Quality Control".to_string()));
}

#[test]
fn substring_industry_earns_partial_bonus() {
    let mut candidate = advocate("a");
    candidate.industry = Some("Industrial Manufacturing".to_string());

    let score = score_advocate(&candidate, &opportunity(), &ScoringConfig::default());

    assert_eq!(points_for(&score, MatchFactor::Industry), Some(12.0));
    assert!(score
        .reasons
        .contains(&"Related industry: Industrial Manufacturing".to_string()));
}

#[test]
fn comparisons_ignore_case_and_whitespace() {
    let mut candidate = advocate("a");
    candidate.region = Some("  north america ".to_string());
    candidate.use_cases = vec!["PROCESS AUTOMATION".to_string()];

    let score = score_advocate(&candidate, &opportunity(), &ScoringConfig::default());

    assert_eq!(points_for(&score, MatchFactor::Region), Some(15.0));
    assert_eq!(points_for(&score, MatchFactor::UseCases), Some(15.0));
}

#[test]
fn missing_desired_fields_only_leave_availability() {
    let score = score_advocate(&advocate("a"), &bare_opportunity(), &ScoringConfig::default());

    assert_eq!(score.components.len(), 1);
    assert_eq!(score.components[0].factor, MatchFactor::Availability);
    assert!((score.value - 8.7).abs() < 1e-9);
    assert_eq!(score.reasons, vec!["Availability: 87/100".to_string()]);
}

#[test]
fn empty_strings_are_treated_as_unset() {
    let mut target = opportunity();
    target.desired_advocate_industry = Some("   ".to_string());
    let mut candidate = advocate("a");
    candidate.industry = Some(String::new());

    let score = score_advocate(&candidate, &target, &ScoringConfig::default());

    assert_eq!(points_for(&score, MatchFactor::Industry), None);
}

#[test]
fn expertise_overlap_is_scored_with_diminishing_returns() {
    let mut target = bare_opportunity();
    target.desired_expertise_areas = vec![
        "Computer Vision".to_string(),
        "Change Management".to_string(),
        "ERP Integration".to_string(),
    ];
    let mut candidate = advocate("a");
    candidate.availability_score = 0;
    candidate.expertise_areas = target.desired_expertise_areas.clone();

    let score = score_advocate(&candidate, &target, &ScoringConfig::default());

    assert_eq!(points_for(&score, MatchFactor::Expertise), Some(15.0));
    assert_eq!(score.reasons.len(), 3);
    assert_eq!(score.value, 15.0);
}

#[test]
fn score_is_clamped_to_upper_bound() {
    let config = ScoringConfig {
        industry_exact_points: 90.0,
        region_points: 90.0,
        ..ScoringConfig::default()
    };

    let score = score_advocate(&advocate("a"), &opportunity(), &config);

    assert_eq!(score.value, MAX_SCORE);
}

#[test]
fn out_of_range_availability_is_capped() {
    let mut candidate = advocate("a");
    candidate.availability_score = 250;

    let score = score_advocate(&candidate, &bare_opportunity(), &ScoringConfig::default());

    assert_eq!(score.value, 10.0);
}

#[test]
fn adding_a_matching_use_case_never_lowers_the_score() {
    let mut target = opportunity();
    target.desired_use_cases = vec![
        "Process Automation".to_string(),
        "Quality Control".to_string(),
        "Predictive Maintenance".to_string(),
        "Inventory Tracking".to_string(),
    ];
    let config = ScoringConfig::default();

    let mut candidate = advocate("a");
    candidate.use_cases.clear();
    let mut previous = score_advocate(&candidate, &target, &config).value;

    for use_case in target.desired_use_cases.clone() {
        candidate.use_cases.push(use_case);
        let next = score_advocate(&candidate, &target, &config).value;
        assert!(next >= previous, "{next} < {previous}");
        previous = next;
    }
}
