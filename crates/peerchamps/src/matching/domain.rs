use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant identifier. Every store and matching call is scoped by one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdvocateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

macro_rules! display_id {
    ($($name:ident),*) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

display_id!(CompanyId, AdvocateId, OpportunityId);

/// Lifecycle of an advocate record. Advocates are never removed, only deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvocateStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Blacklisted,
}

impl AdvocateStatus {
    pub fn label(self) -> &'static str {
        match self {
            AdvocateStatus::Active => "Active",
            AdvocateStatus::Inactive => "Inactive",
            AdvocateStatus::Pending => "Pending",
            AdvocateStatus::Blacklisted => "Blacklisted",
        }
    }
}

/// Customer willing to take reference calls with prospects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advocate {
    pub id: AdvocateId,
    pub company_id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub max_calls_per_month: u32,
    #[serde(default)]
    pub total_calls_completed: u32,
    /// 0-100; values above 100 are treated as 100 during scoring.
    #[serde(default)]
    pub availability_score: u8,
    #[serde(default)]
    pub status: AdvocateStatus,
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub total_ratings: u32,
    #[serde(default)]
    pub last_reference_call: Option<NaiveDate>,
}

impl Advocate {
    pub fn has_capacity(&self) -> bool {
        self.total_calls_completed < self.max_calls_per_month
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.max_calls_per_month
            .saturating_sub(self.total_calls_completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRequestStatus {
    #[default]
    NotRequested,
    Requested,
    Scheduled,
    Completed,
}

impl ReferenceRequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReferenceRequestStatus::NotRequested => "Not requested",
            ReferenceRequestStatus::Requested => "Requested",
            ReferenceRequestStatus::Scheduled => "Scheduled",
            ReferenceRequestStatus::Completed => "Completed",
        }
    }
}

/// Sales deal that may need a reference call. Read-only input to matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub company_id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub prospect_company: Option<String>,
    #[serde(default)]
    pub desired_advocate_industry: Option<String>,
    #[serde(default)]
    pub desired_advocate_size: Option<String>,
    #[serde(default)]
    pub desired_advocate_region: Option<String>,
    #[serde(default)]
    pub desired_use_cases: Vec<String>,
    #[serde(default)]
    pub desired_expertise_areas: Vec<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub reference_request_status: ReferenceRequestStatus,
    #[serde(default)]
    pub expected_close: Option<NaiveDate>,
}

/// Tenant snapshot as exported by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingSnapshot {
    pub company_id: CompanyId,
    #[serde(default)]
    pub advocates: Vec<Advocate>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}

impl MatchingSnapshot {
    /// Splits the snapshot, stamping its tenant on every record so nothing leaks across companies.
    pub fn into_tenant_records(self) -> (CompanyId, Vec<Advocate>, Vec<Opportunity>) {
        let MatchingSnapshot {
            company_id,
            mut advocates,
            mut opportunities,
        } = self;

        for advocate in &mut advocates {
            advocate.company_id = company_id.clone();
        }
        for opportunity in &mut opportunities {
            opportunity.company_id = company_id.clone();
        }
        (company_id, advocates, opportunities)
    }
}
