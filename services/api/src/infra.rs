use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use peerchamps::error::AppError;
use peerchamps::matching::{
    Advocate, AdvocateId, AdvocateRepository, CompanyId, MatchingSnapshot, Opportunity,
    OpportunityId, OpportunityRepository, RepositoryError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type TenantKey<I> = (CompanyId, I);

#[derive(Default, Clone)]
pub(crate) struct InMemoryAdvocateRepository {
    records: Arc<Mutex<HashMap<TenantKey<AdvocateId>, Advocate>>>,
    order: Arc<Mutex<Vec<TenantKey<AdvocateId>>>>,
}

impl AdvocateRepository for InMemoryAdvocateRepository {
    fn insert(&self, advocate: Advocate) -> Result<Advocate, RepositoryError> {
        let key = (advocate.company_id.clone(), advocate.id.clone());
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(key.clone(), advocate.clone());
        self.order
            .lock()
            .expect("repository mutex poisoned")
            .push(key);
        Ok(advocate)
    }

    fn update(&self, advocate: Advocate) -> Result<(), RepositoryError> {
        let key = (advocate.company_id.clone(), advocate.id.clone());
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&key) {
            Some(existing) => {
                *existing = advocate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &AdvocateId,
    ) -> Result<Option<Advocate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(company_id.clone(), id.clone())).cloned())
    }

    fn list(&self, company_id: &CompanyId) -> Result<Vec<Advocate>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        let order = self.order.lock().expect("repository mutex poisoned");
        Ok(order
            .iter()
            .filter(|(company, _)| company == company_id)
            .filter_map(|key| records.get(key).cloned())
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOpportunityRepository {
    records: Arc<Mutex<Vec<Opportunity>>>,
}

impl OpportunityRepository for InMemoryOpportunityRepository {
    fn insert(&self, opportunity: Opportunity) -> Result<Opportunity, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| {
            existing.company_id == opportunity.company_id && existing.id == opportunity.id
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(opportunity.clone());
        Ok(opportunity)
    }

    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|opportunity| &opportunity.company_id == company_id && &opportunity.id == id)
            .cloned())
    }

    fn list(&self, company_id: &CompanyId) -> Result<Vec<Opportunity>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|opportunity| &opportunity.company_id == company_id)
            .cloned()
            .collect())
    }
}

pub(crate) fn read_snapshot(path: &Path) -> Result<MatchingSnapshot, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads snapshot records into the stores under the snapshot's tenant.
pub(crate) fn seed_repositories(
    snapshot: MatchingSnapshot,
    advocates: &InMemoryAdvocateRepository,
    opportunities: &InMemoryOpportunityRepository,
) -> Result<(), RepositoryError> {
    let (_, advocate_records, opportunity_records) = snapshot.into_tenant_records();

    for advocate in advocate_records {
        advocates.insert(advocate)?;
    }
    for opportunity in opportunity_records {
        opportunities.insert(opportunity)?;
    }
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
