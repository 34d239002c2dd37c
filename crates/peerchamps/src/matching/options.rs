use serde::{Deserialize, Serialize};

use super::domain::AdvocateId;

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_TOP_REASONS: usize = 5;

/// Caller-controlled knobs for a single matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingOptions {
    pub max_results: usize,
    pub min_score: f64,
    pub include_inactive: bool,
    pub excluded_advocates: Vec<AdvocateId>,
}

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: 0.0,
            include_inactive: false,
            excluded_advocates: Vec::new(),
        }
    }
}

/// Tenant-independent defaults applied to HTTP and CLI requests.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingDefaults {
    pub options: MatchingOptions,
    pub top_reasons: usize,
}

impl Default for MatchingDefaults {
    fn default() -> Self {
        Self {
            options: MatchingOptions::default(),
            top_reasons: DEFAULT_TOP_REASONS,
        }
    }
}

/// Partial options accepted over HTTP; unset fields fall back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingOptionsOverride {
    pub max_results: Option<usize>,
    pub min_score: Option<f64>,
    pub include_inactive: Option<bool>,
    pub excluded_advocates: Vec<AdvocateId>,
}

impl MatchingOptionsOverride {
    pub fn apply(self, defaults: &MatchingOptions) -> MatchingOptions {
        let mut excluded_advocates = defaults.excluded_advocates.clone();
        excluded_advocates.extend(self.excluded_advocates);

        MatchingOptions {
            max_results: self.max_results.unwrap_or(defaults.max_results),
            min_score: self.min_score.unwrap_or(defaults.min_score),
            include_inactive: self.include_inactive.unwrap_or(defaults.include_inactive),
            excluded_advocates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_keeps_defaults_for_unset_fields() {
        let defaults = MatchingOptions {
            max_results: 3,
            min_score: 40.0,
            ..MatchingOptions::default()
        };
        let options = MatchingOptionsOverride {
            include_inactive: Some(true),
            excluded_advocates: vec![AdvocateId("adv-9".to_string())],
            ..MatchingOptionsOverride::default()
        }
        .apply(&defaults);

        assert_eq!(options.max_results, 3);
        assert_eq!(options.min_score, 40.0);
        assert!(options.include_inactive);
        assert_eq!(options.excluded_advocates.len(), 1);
    }
}
