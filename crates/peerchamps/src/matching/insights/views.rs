use serde::{Deserialize, Serialize};

/// Aggregate counts over one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingStats {
    pub total_advocates: usize,
    pub eligible_advocates: usize,
    pub matches_found: usize,
    pub average_score: f64,
    pub top_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Histogram at the 80/60/40 reporting thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBuckets {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingInsights {
    pub matches_found: usize,
    pub average_score: f64,
    pub top_score: f64,
    pub confidence: ConfidenceBreakdown,
    pub score_buckets: ScoreBuckets,
    pub industry_distribution: Vec<DistributionEntry>,
    pub region_distribution: Vec<DistributionEntry>,
    pub top_reasons: Vec<DistributionEntry>,
}
