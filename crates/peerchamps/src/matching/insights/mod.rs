pub mod views;

use super::ranking::{Confidence, MatchResult};
use super::scoring::{normalize, AVAILABILITY_REASON_PREFIX};
use views::{
    ConfidenceBreakdown, DistributionEntry, MatchingInsights, MatchingStats, ScoreBuckets,
};

pub const UNSPECIFIED_LABEL: &str = "Unspecified";

const EXCELLENT_THRESHOLD: f64 = 80.0;
const GOOD_THRESHOLD: f64 = 60.0;
const FAIR_THRESHOLD: f64 = 40.0;

pub(crate) fn average_and_top(matches: &[MatchResult]) -> (f64, f64) {
    if matches.is_empty() {
        return (0.0, 0.0);
    }
    let total: f64 = matches.iter().map(MatchResult::score).sum();
    let top = matches
        .iter()
        .map(MatchResult::score)
        .fold(f64::MIN, f64::max);
    (total / matches.len() as f64, top)
}

pub(crate) fn stats(
    total_advocates: usize,
    eligible_advocates: usize,
    matches: &[MatchResult],
) -> MatchingStats {
    let (average_score, top_score) = average_and_top(matches);
    MatchingStats {
        total_advocates,
        eligible_advocates,
        matches_found: matches.len(),
        average_score,
        top_score,
    }
}

/// Counts labels case-insensitively, ordered by count descending with ties kept in
/// first-seen order. Each entry keeps the spelling it was first seen with.
fn distribution<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<DistributionEntry> {
    let mut keys: Vec<String> = Vec::new();
    let mut entries: Vec<DistributionEntry> = Vec::new();
    for label in labels {
        let key = normalize(label);
        match keys.iter().position(|existing| *existing == key) {
            Some(index) => entries[index].count += 1,
            None => {
                keys.push(key);
                entries.push(DistributionEntry {
                    label: label.trim().to_string(),
                    count: 1,
                });
            }
        }
    }
    entries.sort_by(|left, right| right.count.cmp(&left.count));
    entries
}

fn label_or_unspecified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNSPECIFIED_LABEL)
}

/// Pure reduction over a match list for reporting.
pub fn aggregate(matches: &[MatchResult], top_reasons: usize) -> MatchingInsights {
    let (average_score, top_score) = average_and_top(matches);

    let mut confidence = ConfidenceBreakdown::default();
    let mut score_buckets = ScoreBuckets::default();
    for result in matches {
        match result.confidence() {
            Confidence::High => confidence.high += 1,
            Confidence::Medium => confidence.medium += 1,
            Confidence::Low => confidence.low += 1,
        }

        let score = result.score();
        if score >= EXCELLENT_THRESHOLD {
            score_buckets.excellent += 1;
        } else if score >= GOOD_THRESHOLD {
            score_buckets.good += 1;
        } else if score >= FAIR_THRESHOLD {
            score_buckets.fair += 1;
        } else {
            score_buckets.poor += 1;
        }
    }

    let industry_distribution = distribution(
        matches
            .iter()
            .map(|result| label_or_unspecified(result.advocate().industry.as_deref())),
    );
    let region_distribution = distribution(
        matches
            .iter()
            .map(|result| label_or_unspecified(result.advocate().region.as_deref())),
    );

    // Availability reasons carry each advocate's own score and never recur.
    let mut reasons = distribution(
        matches
            .iter()
            .flat_map(|result| result.reasons().iter().map(String::as_str))
            .filter(|reason| !reason.starts_with(AVAILABILITY_REASON_PREFIX)),
    );
    reasons.truncate(top_reasons);

    MatchingInsights {
        matches_found: matches.len(),
        average_score,
        top_score,
        confidence,
        score_buckets,
        industry_distribution,
        region_distribution,
        top_reasons: reasons,
    }
}
