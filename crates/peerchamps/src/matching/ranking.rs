use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::Advocate;
use super::options::MatchingOptions;
use super::scoring::{AdvocateScore, ScoreComponent, ScoringConfig};

/// Coarse bucket summarising a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_score(score: f64, config: &ScoringConfig) -> Self {
        if score >= config.high_confidence_threshold {
            Confidence::High
        } else if score >= config.medium_confidence_threshold {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// Advocate paired with its score, before ranking.
#[derive(Debug, Clone)]
pub struct ScoredAdvocate {
    pub advocate: Advocate,
    pub score: AdvocateScore,
}

/// Ranked candidate. Confidence is derived from the score and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    advocate: Advocate,
    score: f64,
    confidence: Confidence,
    reasons: Vec<String>,
    components: Vec<ScoreComponent>,
}

impl MatchResult {
    pub(crate) fn new(scored: ScoredAdvocate, config: &ScoringConfig) -> Self {
        let ScoredAdvocate { advocate, score } = scored;
        Self {
            advocate,
            confidence: Confidence::from_score(score.value, config),
            score: score.value,
            reasons: score.reasons,
            components: score.components,
        }
    }

    pub fn advocate(&self) -> &Advocate {
        &self.advocate
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }
}

/// Higher score first, then higher availability, then fewer completed calls.
fn compare(
    left_score: f64,
    left: &Advocate,
    right_score: f64,
    right: &Advocate,
) -> Ordering {
    right_score
        .total_cmp(&left_score)
        .then_with(|| right.availability_score.cmp(&left.availability_score))
        .then_with(|| left.total_calls_completed.cmp(&right.total_calls_completed))
}

/// Drops entries under `min_score`, orders the rest and truncates to `max_results`.
///
/// The sort is stable, so candidates that tie on every key keep their input order.
pub fn rank(
    scored: Vec<ScoredAdvocate>,
    options: &MatchingOptions,
    config: &ScoringConfig,
) -> Vec<MatchResult> {
    let mut kept: Vec<ScoredAdvocate> = scored
        .into_iter()
        .filter(|entry| entry.score.value >= options.min_score)
        .collect();

    kept.sort_by(|left, right| {
        compare(
            left.score.value,
            &left.advocate,
            right.score.value,
            &right.advocate,
        )
    });
    kept.truncate(options.max_results);

    kept.into_iter()
        .map(|entry| MatchResult::new(entry, config))
        .collect()
}
