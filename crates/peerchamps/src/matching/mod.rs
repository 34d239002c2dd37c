//! Advocate-to-opportunity matching.
//!
//! Matching runs in four steps over an in-memory snapshot: the eligibility gate, the additive
//! scoring model, ranking with confidence tiers, and the insights reduction used for reporting.
//! Everything here is synchronous and side-effect free; persistence lives behind the repository
//! traits consumed by [`service::ReferenceMatchingService`].

pub mod domain;
pub mod eligibility;
pub mod export;
pub mod insights;
pub mod options;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Advocate, AdvocateId, AdvocateStatus, CompanyId, MatchingSnapshot, Opportunity,
    OpportunityId, ReferenceRequestStatus, Urgency,
};
pub use eligibility::filter_eligible;
pub use export::{write_matches_csv, ExportError};
pub use insights::views::{
    ConfidenceBreakdown, DistributionEntry, MatchingInsights, MatchingStats, ScoreBuckets,
};
pub use insights::aggregate;
pub use options::{MatchingDefaults, MatchingOptions, MatchingOptionsOverride};
pub use ranking::{rank, Confidence, MatchResult, ScoredAdvocate};
pub use repository::{AdvocateRepository, OpportunityRepository, RepositoryError};
pub use router::matching_router;
pub use scoring::{score_advocate, AdvocateScore, MatchFactor, ScoreComponent, ScoringConfig};
pub use service::{MatchingServiceError, ReferenceMatchingService};

use serde::Serialize;
use tracing::trace;

/// Ranked matches and aggregate counts for one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingResponse {
    pub matches: Vec<MatchResult>,
    pub stats: MatchingStats,
}

/// Matching output for one opportunity within a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityMatches {
    pub opportunity_id: OpportunityId,
    pub opportunity_name: String,
    pub urgency: Urgency,
    #[serde(flatten)]
    pub response: MatchingResponse,
}

/// Stateless engine applying a scoring configuration to advocate pools.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: ScoringConfig,
}

impl MatchingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn find_matches(
        &self,
        opportunity: &Opportunity,
        advocates: &[Advocate],
        options: &MatchingOptions,
    ) -> MatchingResponse {
        let mut scored = Vec::new();
        for advocate in advocates {
            if let Err(reason) = eligibility::check(advocate, opportunity, options) {
                trace!(advocate = %advocate.id.0, ?reason, "advocate filtered out");
                continue;
            }
            scored.push(ScoredAdvocate {
                advocate: advocate.clone(),
                score: score_advocate(advocate, opportunity, &self.config),
            });
        }

        let eligible = scored.len();
        let matches = rank(scored, options, &self.config);
        let stats = insights::stats(advocates.len(), eligible, &matches);

        MatchingResponse { matches, stats }
    }

    /// Matches every opportunity with an open reference request, most urgent first.
    pub fn match_opportunities(
        &self,
        opportunities: &[Opportunity],
        advocates: &[Advocate],
        options: &MatchingOptions,
    ) -> Vec<OpportunityMatches> {
        let mut requested: Vec<&Opportunity> = opportunities
            .iter()
            .filter(|opportunity| {
                opportunity.reference_request_status == ReferenceRequestStatus::Requested
            })
            .collect();
        requested.sort_by(|left, right| right.urgency.cmp(&left.urgency));

        requested
            .into_iter()
            .map(|opportunity| self.match_one(opportunity, advocates, options))
            .collect()
    }

    /// [`Self::find_matches`] labelled with the opportunity it was run for.
    pub fn match_one(
        &self,
        opportunity: &Opportunity,
        advocates: &[Advocate],
        options: &MatchingOptions,
    ) -> OpportunityMatches {
        OpportunityMatches {
            opportunity_id: opportunity.id.clone(),
            opportunity_name: opportunity.name.clone(),
            urgency: opportunity.urgency,
            response: self.find_matches(opportunity, advocates, options),
        }
    }
}
