mod config;
mod rules;

pub(crate) use rules::{normalize, AVAILABILITY_REASON_PREFIX};

pub use config::ScoringConfig;

use super::domain::{Advocate, Opportunity};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Attribute that contributed points to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Industry,
    CompanySize,
    Region,
    UseCases,
    Expertise,
    Availability,
}

/// Discrete contribution to a score, kept so matches can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: f64,
}

/// Scoring output for one advocate against one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvocateScore {
    pub value: f64,
    pub reasons: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

/// Pure function mapping an (advocate, opportunity) pair to a clamped score.
pub fn score_advocate(
    advocate: &Advocate,
    opportunity: &Opportunity,
    config: &ScoringConfig,
) -> AdvocateScore {
    let (components, reasons) = rules::score_factors(advocate, opportunity, config);
    let raw: f64 = components.iter().map(|component| component.points).sum();

    AdvocateScore {
        value: raw.clamp(MIN_SCORE, MAX_SCORE),
        reasons,
        components,
    }
}
