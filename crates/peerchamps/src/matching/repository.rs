use super::domain::{Advocate, AdvocateId, CompanyId, Opportunity, OpportunityId};

/// Advocate storage, always addressed through an explicit tenant.
pub trait AdvocateRepository: Send + Sync {
    fn insert(&self, advocate: Advocate) -> Result<Advocate, RepositoryError>;
    fn update(&self, advocate: Advocate) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &AdvocateId,
    ) -> Result<Option<Advocate>, RepositoryError>;
    fn list(&self, company_id: &CompanyId) -> Result<Vec<Advocate>, RepositoryError>;
}

/// Opportunity storage. Matching only reads from it.
pub trait OpportunityRepository: Send + Sync {
    fn insert(&self, opportunity: Opportunity) -> Result<Opportunity, RepositoryError>;
    fn fetch(
        &self,
        company_id: &CompanyId,
        id: &OpportunityId,
    ) -> Result<Option<Opportunity>, RepositoryError>;
    fn list(&self, company_id: &CompanyId) -> Result<Vec<Opportunity>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
