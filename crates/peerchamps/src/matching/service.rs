use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::domain::{Advocate, AdvocateId, AdvocateStatus, CompanyId, OpportunityId};
use super::insights::{aggregate, views::MatchingInsights};
use super::options::MatchingOptions;
use super::repository::{AdvocateRepository, OpportunityRepository, RepositoryError};
use super::scoring::ScoringConfig;
use super::{MatchingEngine, MatchingResponse, OpportunityMatches};

/// Service composing the tenant stores with the matching engine.
pub struct ReferenceMatchingService<A, O> {
    advocates: Arc<A>,
    opportunities: Arc<O>,
    engine: Arc<MatchingEngine>,
}

impl<A, O> ReferenceMatchingService<A, O>
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    pub fn new(advocates: Arc<A>, opportunities: Arc<O>, config: ScoringConfig) -> Self {
        Self {
            advocates,
            opportunities,
            engine: Arc::new(MatchingEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Rank the tenant's advocates for one opportunity.
    pub fn match_opportunity(
        &self,
        company_id: &CompanyId,
        opportunity_id: &OpportunityId,
        options: &MatchingOptions,
    ) -> Result<MatchingResponse, MatchingServiceError> {
        let opportunity = self
            .opportunities
            .fetch(company_id, opportunity_id)?
            .ok_or_else(|| MatchingServiceError::OpportunityNotFound(opportunity_id.clone()))?;
        let pool = self.advocates.list(company_id)?;

        let response = self.engine.find_matches(&opportunity, &pool, options);
        debug!(
            company = %company_id.0,
            opportunity = %opportunity_id.0,
            pool = response.stats.total_advocates,
            eligible = response.stats.eligible_advocates,
            matches = response.stats.matches_found,
            "matched opportunity"
        );
        Ok(response)
    }

    /// Same as [`Self::match_opportunity`] plus the reporting reduction.
    pub fn match_with_insights(
        &self,
        company_id: &CompanyId,
        opportunity_id: &OpportunityId,
        options: &MatchingOptions,
        top_reasons: usize,
    ) -> Result<(MatchingResponse, MatchingInsights), MatchingServiceError> {
        let response = self.match_opportunity(company_id, opportunity_id, options)?;
        let insights = aggregate(&response.matches, top_reasons);
        Ok((response, insights))
    }

    /// Batch run over every opportunity with an open reference request.
    pub fn match_requested(
        &self,
        company_id: &CompanyId,
        options: &MatchingOptions,
    ) -> Result<Vec<OpportunityMatches>, MatchingServiceError> {
        let opportunities = self.opportunities.list(company_id)?;
        let pool = self.advocates.list(company_id)?;
        let batch = self
            .engine
            .match_opportunities(&opportunities, &pool, options);
        info!(
            company = %company_id.0,
            opportunities = batch.len(),
            "matched requested opportunities"
        );
        Ok(batch)
    }

    /// Counts a completed reference call against the advocate's capacity.
    pub fn record_completed_call(
        &self,
        company_id: &CompanyId,
        advocate_id: &AdvocateId,
        completed_on: NaiveDate,
    ) -> Result<Advocate, MatchingServiceError> {
        let mut advocate = self.load_advocate(company_id, advocate_id)?;
        advocate.total_calls_completed = advocate.total_calls_completed.saturating_add(1);
        advocate.last_reference_call = Some(completed_on);
        self.advocates.update(advocate.clone())?;

        if !advocate.has_capacity() {
            info!(
                company = %company_id.0,
                advocate = %advocate_id.0,
                "advocate reached monthly call capacity"
            );
        }
        Ok(advocate)
    }

    /// Flips an active or pending advocate to inactive. Records are never deleted.
    ///
    /// Blacklisted advocates keep their status so `include_inactive` cannot readmit them.
    pub fn deactivate_advocate(
        &self,
        company_id: &CompanyId,
        advocate_id: &AdvocateId,
    ) -> Result<Advocate, MatchingServiceError> {
        let mut advocate = self.load_advocate(company_id, advocate_id)?;
        match advocate.status {
            AdvocateStatus::Active | AdvocateStatus::Pending => {
                advocate.status = AdvocateStatus::Inactive;
                self.advocates.update(advocate.clone())?;
            }
            AdvocateStatus::Inactive => {}
            AdvocateStatus::Blacklisted => {
                debug!(
                    company = %company_id.0,
                    advocate = %advocate_id.0,
                    "blacklisted advocate left unchanged by deactivation"
                );
            }
        }
        Ok(advocate)
    }

    fn load_advocate(
        &self,
        company_id: &CompanyId,
        advocate_id: &AdvocateId,
    ) -> Result<Advocate, MatchingServiceError> {
        self.advocates
            .fetch(company_id, advocate_id)?
            .ok_or_else(|| MatchingServiceError::AdvocateNotFound(advocate_id.clone()))
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("opportunity {0} not found")]
    OpportunityNotFound(OpportunityId),
    #[error("advocate {0} not found")]
    AdvocateNotFound(AdvocateId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
