use crate::infra::{
    read_snapshot, InMemoryAdvocateRepository, InMemoryOpportunityRepository,
};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use peerchamps::config::AppConfig;
use peerchamps::error::AppError;
use peerchamps::matching::{
    aggregate, write_matches_csv, Advocate, AdvocateId, AdvocateRepository, AdvocateStatus,
    CompanyId, MatchingDefaults, MatchingEngine, MatchingInsights, MatchingOptionsOverride,
    MatchingServiceError, Opportunity, OpportunityId, OpportunityMatches, OpportunityRepository,
    ReferenceMatchingService, ReferenceRequestStatus, ScoringConfig, Urgency,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON snapshot with `company_id`, `advocates` and `opportunities`
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Match a single opportunity instead of every requested one
    #[arg(long)]
    pub(crate) opportunity: Option<String>,
    /// Maximum matches returned per opportunity
    #[arg(long)]
    pub(crate) max_results: Option<usize>,
    /// Drop candidates scoring below this value (0-100)
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Consider inactive and pending advocates
    #[arg(long)]
    pub(crate) include_inactive: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date recorded for the demo reference call (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Maximum matches shown per opportunity.
    #[arg(long)]
    pub(crate) max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OpportunityReport<'a> {
    #[serde(flatten)]
    matches: &'a OpportunityMatches,
    insights: MatchingInsights,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        snapshot,
        opportunity,
        max_results,
        min_score,
        include_inactive,
        format,
    } = args;

    let defaults = AppConfig::load()?.matching.defaults();
    let options = MatchingOptionsOverride {
        max_results,
        min_score,
        include_inactive: include_inactive.then_some(true),
        ..MatchingOptionsOverride::default()
    }
    .apply(&defaults.options);

    let (_, advocates, opportunities) = read_snapshot(&snapshot)?.into_tenant_records();
    let engine = MatchingEngine::new(ScoringConfig::default());

    let results = match opportunity {
        Some(id) => {
            let id = OpportunityId(id);
            let target = opportunities
                .iter()
                .find(|candidate| candidate.id == id)
                .ok_or(MatchingServiceError::OpportunityNotFound(id))?;
            vec![engine.match_one(target, &advocates, &options)]
        }
        None => engine.match_opportunities(&opportunities, &advocates, &options),
    };

    match format {
        OutputFormat::Table => render_matches(&results, &defaults),
        OutputFormat::Json => {
            let reports: Vec<OpportunityReport<'_>> = results
                .iter()
                .map(|entry| OpportunityReport {
                    matches: entry,
                    insights: aggregate(&entry.response.matches, defaults.top_reasons),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Csv => write_matches_csv(std::io::stdout().lock(), &results)?,
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, max_results } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let company = CompanyId("acme-robotics".to_string());
    let advocates = Arc::new(InMemoryAdvocateRepository::default());
    let opportunities = Arc::new(InMemoryOpportunityRepository::default());
    for advocate in demo_advocates(&company) {
        advocates
            .insert(advocate)
            .map_err(MatchingServiceError::from)?;
    }
    for opportunity in demo_opportunities(&company) {
        opportunities
            .insert(opportunity)
            .map_err(MatchingServiceError::from)?;
    }

    let service =
        ReferenceMatchingService::new(advocates, opportunities, ScoringConfig::default());
    let defaults = MatchingDefaults::default();
    let options = MatchingOptionsOverride {
        max_results,
        ..MatchingOptionsOverride::default()
    }
    .apply(&defaults.options);

    println!("Reference matching demo for {}", company);
    let batch = service.match_requested(&company, &options)?;
    render_matches(&batch, &defaults);

    let Some(top) = batch
        .first()
        .and_then(|entry| entry.response.matches.first())
    else {
        println!("\nNo eligible advocates; skipping call scheduling");
        return Ok(());
    };

    let advocate_id = top.advocate().id.clone();
    let updated = service.record_completed_call(&company, &advocate_id, today)?;
    println!(
        "\nRecorded reference call for {} on {} ({} of {} monthly calls used)",
        updated.name, today, updated.total_calls_completed, updated.max_calls_per_month
    );

    if !updated.has_capacity() {
        println!("{} is now at capacity and drops out of matching", updated.name);
        let rerun = service.match_requested(&company, &options)?;
        render_matches(&rerun, &defaults);
    }

    Ok(())
}

fn render_matches(results: &[OpportunityMatches], defaults: &MatchingDefaults) {
    if results.is_empty() {
        println!("\nNo opportunities to match");
        return;
    }

    for entry in results {
        let stats = &entry.response.stats;
        println!(
            "\n{} [{}] ({} urgency)",
            entry.opportunity_name,
            entry.opportunity_id,
            entry.urgency.label()
        );
        println!(
            "- {} advocates, {} eligible, {} matched | avg {:.1} | top {:.1}",
            stats.total_advocates,
            stats.eligible_advocates,
            stats.matches_found,
            stats.average_score,
            stats.top_score
        );

        if entry.response.matches.is_empty() {
            println!("  No matches above the score threshold");
            continue;
        }

        for (rank, result) in entry.response.matches.iter().enumerate() {
            let advocate = result.advocate();
            println!(
                "  {}. {} ({}) score {:.1} [{}], {} call(s) left",
                rank + 1,
                advocate.name,
                advocate.id,
                result.score(),
                result.confidence().label(),
                advocate.remaining_capacity()
            );
            for reason in result.reasons() {
                println!("     - {reason}");
            }
        }

        let insights = aggregate(&entry.response.matches, defaults.top_reasons);
        println!(
            "  Confidence: {} high / {} medium / {} low",
            insights.confidence.high, insights.confidence.medium, insights.confidence.low
        );
        if let Some(industry) = insights.industry_distribution.first() {
            println!(
                "  Most represented industry: {} ({})",
                industry.label, industry.count
            );
        }
    }
}

fn demo_advocate(company: &CompanyId, id: &str, name: &str) -> Advocate {
    Advocate {
        id: AdvocateId(id.to_string()),
        company_id: company.clone(),
        name: name.to_string(),
        title: None,
        industry: None,
        company_size: None,
        region: None,
        use_cases: Vec::new(),
        expertise_areas: Vec::new(),
        languages: vec!["English".to_string()],
        max_calls_per_month: 4,
        total_calls_completed: 0,
        availability_score: 50,
        status: AdvocateStatus::Active,
        average_rating: None,
        total_ratings: 0,
        last_reference_call: None,
    }
}

fn demo_advocates(company: &CompanyId) -> Vec<Advocate> {
    let mut priya = demo_advocate(company, "adv-001", "Priya Raman");
    priya.title = Some("VP Operations, Midwest Fabrication".to_string());
    priya.industry = Some("Manufacturing".to_string());
    priya.company_size = Some("201-500".to_string());
    priya.region = Some("North America".to_string());
    priya.use_cases = vec![
        "Process Automation".to_string(),
        "Quality Control".to_string(),
    ];
    priya.availability_score = 87;
    priya.max_calls_per_month = 1;
    priya.average_rating = Some(4.8);
    priya.total_ratings = 12;

    let mut tomas = demo_advocate(company, "adv-002", "Tomas Lindqvist");
    tomas.industry = Some("Industrial Manufacturing".to_string());
    tomas.company_size = Some("1000+".to_string());
    tomas.region = Some("Europe".to_string());
    tomas.use_cases = vec!["Quality Control".to_string()];
    tomas.expertise_areas = vec!["Computer Vision".to_string()];
    tomas.availability_score = 64;

    let mut dana = demo_advocate(company, "adv-003", "Dana Okafor");
    dana.industry = Some("Logistics".to_string());
    dana.region = Some("North America".to_string());
    dana.use_cases = vec!["Warehouse Robotics".to_string()];
    dana.availability_score = 92;

    let mut lee = demo_advocate(company, "adv-004", "Morgan Lee");
    lee.industry = Some("Manufacturing".to_string());
    lee.status = AdvocateStatus::Inactive;

    vec![priya, tomas, dana, lee]
}

fn demo_opportunities(company: &CompanyId) -> Vec<Opportunity> {
    vec![
        Opportunity {
            id: OpportunityId("opp-101".to_string()),
            company_id: company.clone(),
            name: "Initech plant automation".to_string(),
            prospect_company: Some("Initech".to_string()),
            desired_advocate_industry: Some("Manufacturing".to_string()),
            desired_advocate_size: Some("201-500".to_string()),
            desired_advocate_region: Some("North America".to_string()),
            desired_use_cases: vec![
                "Process Automation".to_string(),
                "Quality Control".to_string(),
            ],
            desired_expertise_areas: vec!["Computer Vision".to_string()],
            urgency: Urgency::High,
            reference_request_status: ReferenceRequestStatus::Requested,
            expected_close: None,
        },
        Opportunity {
            id: OpportunityId("opp-102".to_string()),
            company_id: company.clone(),
            name: "Globex fulfilment pilot".to_string(),
            prospect_company: Some("Globex".to_string()),
            desired_advocate_industry: Some("Logistics".to_string()),
            desired_advocate_size: None,
            desired_advocate_region: Some("North America".to_string()),
            desired_use_cases: vec!["Warehouse Robotics".to_string()],
            desired_expertise_areas: Vec::new(),
            urgency: Urgency::Medium,
            reference_request_status: ReferenceRequestStatus::Requested,
            expected_close: None,
        },
    ]
}
