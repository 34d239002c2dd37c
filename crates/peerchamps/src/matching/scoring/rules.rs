use super::super::domain::{Advocate, Opportunity};
use super::config::ScoringConfig;
use super::{MatchFactor, ScoreComponent};

/// Prefix of the per-advocate availability reason.
pub(crate) const AVAILABILITY_REASON_PREFIX: &str = "Availability: ";

pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn desired(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(normalize)
        .filter(|value| !value.is_empty())
}

/// Desired entries (in request order, deduplicated) that the advocate also lists.
fn overlap<'a>(offered: &[String], wanted: &'a [String]) -> Vec<&'a str> {
    let offered: Vec<String> = offered.iter().map(|value| normalize(value)).collect();
    let mut seen = Vec::new();
    let mut matched = Vec::new();

    for entry in wanted {
        let key = normalize(entry);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        if offered.contains(&key) {
            matched.push(entry.trim());
        }
        seen.push(key);
    }

    matched
}

fn overlap_points(matches: usize, first: f64, additional: f64, cap: f64) -> f64 {
    if matches == 0 {
        return 0.0;
    }
    (first + additional * (matches - 1) as f64).min(cap)
}

pub(crate) fn score_factors(
    advocate: &Advocate,
    opportunity: &Opportunity,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, Vec<String>) {
    let mut components = Vec::new();
    let mut reasons = Vec::new();

    if let (Some(wanted), Some(actual)) = (
        desired(&opportunity.desired_advocate_industry),
        desired(&advocate.industry),
    ) {
        let label = advocate.industry.as_deref().unwrap_or_default().trim();
        if wanted == actual {
            components.push(ScoreComponent {
                factor: MatchFactor::Industry,
                points: config.industry_exact_points,
            });
            reasons.push(format!("Industry match: {label}"));
        } else if actual.contains(&wanted) || wanted.contains(&actual) {
            components.push(ScoreComponent {
                factor: MatchFactor::Industry,
                points: config.industry_partial_points,
            });
            reasons.push(format!("Related industry: {label}"));
        }
    }

    if let (Some(wanted), Some(actual)) = (
        desired(&opportunity.desired_advocate_size),
        desired(&advocate.company_size),
    ) {
        if wanted == actual {
            components.push(ScoreComponent {
                factor: MatchFactor::CompanySize,
                points: config.company_size_points,
            });
            reasons.push(format!(
                "Company size match: {}",
                advocate.company_size.as_deref().unwrap_or_default().trim()
            ));
        }
    }

    if let (Some(wanted), Some(actual)) = (
        desired(&opportunity.desired_advocate_region),
        desired(&advocate.region),
    ) {
        if wanted == actual {
            components.push(ScoreComponent {
                factor: MatchFactor::Region,
                points: config.region_points,
            });
            reasons.push(format!(
                "Region match: {}",
                advocate.region.as_deref().unwrap_or_default().trim()
            ));
        }
    }

    let use_cases = overlap(&advocate.use_cases, &opportunity.desired_use_cases);
    if !use_cases.is_empty() {
        components.push(ScoreComponent {
            factor: MatchFactor::UseCases,
            points: overlap_points(
                use_cases.len(),
                config.use_case_first_points,
                config.use_case_additional_points,
                config.use_case_cap,
            ),
        });
        reasons.extend(
            use_cases
                .iter()
                .map(|use_case| format!("Use case match: {use_case}")),
        );
    }

    let expertise = overlap(
        &advocate.expertise_areas,
        &opportunity.desired_expertise_areas,
    );
    if !expertise.is_empty() {
        components.push(ScoreComponent {
            factor: MatchFactor::Expertise,
            points: overlap_points(
                expertise.len(),
                config.expertise_first_points,
                config.expertise_additional_points,
                config.expertise_cap,
            ),
        });
        reasons.extend(
            expertise
                .iter()
                .map(|area| format!("Expertise match: {area}")),
        );
    }

    let availability = advocate.availability_score.min(100);
    if availability > 0 {
        components.push(ScoreComponent {
            factor: MatchFactor::Availability,
            points: config.availability_max_points * f64::from(availability) / 100.0,
        });
        reasons.push(format!("{AVAILABILITY_REASON_PREFIX}{availability}/100"));
    }

    (components, reasons)
}
