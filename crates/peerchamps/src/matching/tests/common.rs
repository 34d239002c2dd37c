use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    Advocate, AdvocateId, AdvocateStatus, CompanyId, Opportunity, OpportunityId,
    ReferenceRequestStatus, Urgency,
};
use crate::matching::repository::{AdvocateRepository, OpportunityRepository, RepositoryError};
use crate::matching::{
    matching_router, MatchingDefaults, MatchingEngine, ReferenceMatchingService, ScoringConfig,
};

pub(super) const COMPANY: &str = "acme-robotics";

pub(super) fn company() -> CompanyId {
    CompanyId(COMPANY.to_string())
}

/// Advocate that lines up with every attribute of [`opportunity`].
pub(super) fn advocate(id: &str) -> Advocate {
    Advocate {
        id: AdvocateId(id.to_string()),
        company_id: company(),
        name: format!("Advocate {id}"),
        title: None,
        industry: Some("Manufacturing".to_string()),
        company_size: Some("201-500".to_string()),
        region: Some("North America".to_string()),
        use_cases: vec![
            "Process Automation".to_string(),
            "Quality Control".to_string(),
        ],
        expertise_areas: Vec::new(),
        languages: vec!["English".to_string()],
        max_calls_per_month: 4,
        total_calls_completed: 0,
        availability_score: 87,
        status: AdvocateStatus::Active,
        average_rating: Some(4.6),
        total_ratings: 5,
        last_reference_call: None,
    }
}

/// Advocate sharing nothing with [`opportunity`] apart from availability.
pub(super) fn unrelated_advocate(id: &str) -> Advocate {
    Advocate {
        industry: Some("Healthcare".to_string()),
        company_size: Some("1-50".to_string()),
        region: Some("APAC".to_string()),
        use_cases: vec!["Telemedicine".to_string()],
        availability_score: 40,
        ..advocate(id)
    }
}

pub(super) fn opportunity() -> Opportunity {
    Opportunity {
        id: OpportunityId("opp-1".to_string()),
        company_id: company(),
        name: "Initech plant automation".to_string(),
        prospect_company: Some("Initech".to_string()),
        desired_advocate_industry: Some("Manufacturing".to_string()),
        desired_advocate_size: Some("201-500".to_string()),
        desired_advocate_region: Some("North America".to_string()),
        desired_use_cases: vec![
            "Process Automation".to_string(),
            "Quality Control".to_string(),
        ],
        desired_expertise_areas: Vec::new(),
        urgency: Urgency::High,
        reference_request_status: ReferenceRequestStatus::Requested,
        expected_close: None,
    }
}

pub(super) fn bare_opportunity() -> Opportunity {
    Opportunity {
        desired_advocate_industry: None,
        desired_advocate_size: None,
        desired_advocate_region: None,
        desired_use_cases: Vec::new(),
        desired_expertise_areas: Vec::new(),
        ..opportunity()
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(ScoringConfig::default())
}

#[derive(Default)]
pub(super) struct MemoryAdvocates {
    records: Mutex<Vec<Advocate>>,
}

impl MemoryAdvocates {
    pub(super) fn with(advocates: Vec<Advocate>) -> Self {
        Self {
            records: Mutex::new(advocates),
        }
    }
}

impl AdvocateRepository for MemoryAdvocates {
    fn insert(&self, advocate: Advocate) -> Result<Advocate, RepositoryError> {
        let mut guard = self.records.lock().expect("advocate mutex poisoned");
        if guard.iter().any(|existing| existing.id == advocate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(advocate.clone());
        Ok(advocate)
    }

    fn update(&self, advocate: Advocate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("advocate mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| {
                existing.id == advocate.id && existing.company_id == advocate.company_id
            })
            .ok_or(RepositoryError::NotFound)?;
        *slot = advocate;
        Ok(())
    }

    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &AdvocateId,
    ) -> Result<Option<Advocate>, RepositoryError> {
        let guard = self.records.lock().expect("advocate mutex poisoned");
        Ok(guard
            .iter()
            .find(|advocate| &advocate.company_id == company_id && &advocate.id == id)
            .cloned())
    }

    fn list(&self, company_id: &CompanyId) -> Result<Vec<Advocate>, RepositoryError> {
        let guard = self.records.lock().expect("advocate mutex poisoned");
        Ok(guard
            .iter()
            .filter(|advocate| &advocate.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryOpportunities {
    records: Mutex<HashMap<(CompanyId, OpportunityId), Opportunity>>,
    order: Mutex<Vec<(CompanyId, OpportunityId)>>,
}

impl MemoryOpportunities {
    pub(super) fn with(opportunities: Vec<Opportunity>) -> Self {
        let store = Self::default();
        for opportunity in opportunities {
            store.insert(opportunity).expect("unique opportunity");
        }
        store
    }
}

impl OpportunityRepository for MemoryOpportunities {
    fn insert(&self, opportunity: Opportunity) -> Result<Opportunity, RepositoryError> {
        let key = (opportunity.company_id.clone(), opportunity.id.clone());
        let mut guard = self.records.lock().expect("opportunity mutex poisoned");
        if guard.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(key.clone(), opportunity.clone());
        self.order
            .lock()
            .expect("opportunity mutex poisoned")
            .push(key);
        Ok(opportunity)
    }

    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, RepositoryError> {
        let guard = self.records.lock().expect("opportunity mutex poisoned");
        Ok(guard.get(&(company_id.clone(), id.clone())).cloned())
    }

    fn list(&self, company_id: &CompanyId) -> Result<Vec<Opportunity>, RepositoryError> {
        let records = self.records.lock().expect("opportunity mutex poisoned");
        let order = self.order.lock().expect("opportunity mutex poisoned");
        Ok(order
            .iter()
            .filter(|(company, _)| company == company_id)
            .filter_map(|key| records.get(key).cloned())
            .collect())
    }
}

pub(super) struct UnavailableAdvocates;

impl AdvocateRepository for UnavailableAdvocates {
    fn insert(&self, _advocate: Advocate) -> Result<Advocate, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _advocate: Advocate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _company_id: &CompanyId,
        _id: &AdvocateId,
    ) -> Result<Option<Advocate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _company_id: &CompanyId) -> Result<Vec<Advocate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = ReferenceMatchingService<MemoryAdvocates, MemoryOpportunities>;

pub(super) fn build_service(
    advocates: Vec<Advocate>,
    opportunities: Vec<Opportunity>,
) -> (Arc<MemoryService>, Arc<MemoryAdvocates>) {
    let advocate_store = Arc::new(MemoryAdvocates::with(advocates));
    let service = Arc::new(ReferenceMatchingService::new(
        advocate_store.clone(),
        Arc::new(MemoryOpportunities::with(opportunities)),
        ScoringConfig::default(),
    ));
    (service, advocate_store)
}

pub(super) fn router_with_service(service: Arc<MemoryService>) -> axum::Router {
    matching_router(service, MatchingDefaults::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
