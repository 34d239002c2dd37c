use super::domain::{Advocate, AdvocateStatus, Opportunity};
use super::options::MatchingOptions;

/// Why an advocate was kept out of scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ineligibility {
    OtherTenant,
    Blacklisted,
    NotActive(AdvocateStatus),
    CapacityExhausted,
    Excluded,
}

pub(crate) fn check(
    advocate: &Advocate,
    opportunity: &Opportunity,
    options: &MatchingOptions,
) -> Result<(), Ineligibility> {
    if advocate.company_id != opportunity.company_id {
        return Err(Ineligibility::OtherTenant);
    }

    match advocate.status {
        AdvocateStatus::Active => {}
        AdvocateStatus::Blacklisted => return Err(Ineligibility::Blacklisted),
        status if !options.include_inactive => return Err(Ineligibility::NotActive(status)),
        _ => {}
    }

    // Capacity is a hard stop: full advocates are rejected, not queued.
    if !advocate.has_capacity() {
        return Err(Ineligibility::CapacityExhausted);
    }

    if options.excluded_advocates.contains(&advocate.id) {
        return Err(Ineligibility::Excluded);
    }

    Ok(())
}

/// Hard pass/fail gate applied before any scoring happens.
pub fn filter_eligible<'a>(
    advocates: &'a [Advocate],
    opportunity: &Opportunity,
    options: &MatchingOptions,
) -> Vec<&'a Advocate> {
    advocates
        .iter()
        .filter(|advocate| check(advocate, opportunity, options).is_ok())
        .collect()
}
