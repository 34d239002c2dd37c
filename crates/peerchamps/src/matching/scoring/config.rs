use serde::{Deserialize, Serialize};

/// Point values and tier boundaries for the additive scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub industry_exact_points: f64,
    pub industry_partial_points: f64,
    pub company_size_points: f64,
    pub region_points: f64,
    pub use_case_first_points: f64,
    pub use_case_additional_points: f64,
    pub use_case_cap: f64,
    pub expertise_first_points: f64,
    pub expertise_additional_points: f64,
    pub expertise_cap: f64,
    /// Awarded in full at availability 100, proportionally below.
    pub availability_max_points: f64,
    pub high_confidence_threshold: f64,
    pub medium_confidence_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            industry_exact_points: 25.0,
            industry_partial_points: 12.0,
            company_size_points: 15.0,
            region_points: 15.0,
            use_case_first_points: 15.0,
            use_case_additional_points: 10.0,
            use_case_cap: 30.0,
            expertise_first_points: 10.0,
            expertise_additional_points: 5.0,
            expertise_cap: 15.0,
            availability_max_points: 10.0,
            high_confidence_threshold: 80.0,
            medium_confidence_threshold: 50.0,
        }
    }
}
