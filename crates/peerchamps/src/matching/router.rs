use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use super::domain::{Advocate, AdvocateId, CompanyId, Opportunity, OpportunityId};
use super::insights::{aggregate, views::MatchingInsights};
use super::options::{MatchingDefaults, MatchingOptionsOverride};
use super::repository::{AdvocateRepository, OpportunityRepository, RepositoryError};
use super::service::{MatchingServiceError, ReferenceMatchingService};
use super::{MatchResult, MatchingStats, OpportunityMatches};

/// Shared state behind the matching routes.
pub struct MatchingState<A, O> {
    pub service: Arc<ReferenceMatchingService<A, O>>,
    pub defaults: MatchingDefaults,
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub opportunity_id: OpportunityId,
    pub matches: Vec<MatchResult>,
    pub stats: MatchingStats,
    pub insights: MatchingInsights,
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub company_id: CompanyId,
    pub opportunities: Vec<OpportunityMatches>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordCallRequest {
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

/// Ad hoc matching over caller-supplied records; nothing is read from the stores.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub opportunity: Opportunity,
    #[serde(default)]
    pub advocates: Vec<Advocate>,
    #[serde(default)]
    pub options: MatchingOptionsOverride,
}

/// Router builder exposing matching, capacity, and preview endpoints.
pub fn matching_router<A, O>(
    service: Arc<ReferenceMatchingService<A, O>>,
    defaults: MatchingDefaults,
) -> Router
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let state = Arc::new(MatchingState { service, defaults });

    Router::new()
        .route(
            "/api/v1/companies/:company_id/opportunities/:opportunity_id/matches",
            post(match_handler::<A, O>),
        )
        .route(
            "/api/v1/companies/:company_id/matches",
            post(batch_handler::<A, O>),
        )
        .route(
            "/api/v1/companies/:company_id/advocates/:advocate_id/calls",
            post(record_call_handler::<A, O>),
        )
        .route(
            "/api/v1/companies/:company_id/advocates/:advocate_id/deactivate",
            post(deactivate_handler::<A, O>),
        )
        .route("/api/v1/matching/preview", post(preview_handler::<A, O>))
        .with_state(state)
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = match &error {
        MatchingServiceError::OpportunityNotFound(_)
        | MatchingServiceError::AdvocateNotFound(_)
        | MatchingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MatchingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

/// Decodes an optional JSON body; an empty body yields the type's defaults.
fn json_or_default<T>(body: &Bytes) -> Result<T, Response>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        let payload = json!({ "error": format!("invalid request body: {err}") });
        (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
    })
}

pub(crate) async fn match_handler<A, O>(
    State(state): State<Arc<MatchingState<A, O>>>,
    Path((company_id, opportunity_id)): Path<(String, String)>,
    body: Bytes,
) -> Response
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let overrides: MatchingOptionsOverride = match json_or_default(&body) {
        Ok(overrides) => overrides,
        Err(rejection) => return rejection,
    };
    let options = overrides.apply(&state.defaults.options);
    let opportunity_id = OpportunityId(opportunity_id);

    match state.service.match_with_insights(
        &CompanyId(company_id),
        &opportunity_id,
        &options,
        state.defaults.top_reasons,
    ) {
        Ok((response, insights)) => {
            let report = MatchReport {
                opportunity_id,
                matches: response.matches,
                stats: response.stats,
                insights,
            };
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_handler<A, O>(
    State(state): State<Arc<MatchingState<A, O>>>,
    Path(company_id): Path<String>,
    body: Bytes,
) -> Response
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let overrides: MatchingOptionsOverride = match json_or_default(&body) {
        Ok(overrides) => overrides,
        Err(rejection) => return rejection,
    };
    let options = overrides.apply(&state.defaults.options);
    let company_id = CompanyId(company_id);

    match state.service.match_requested(&company_id, &options) {
        Ok(opportunities) => {
            let report = BatchReport {
                company_id,
                opportunities,
            };
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_call_handler<A, O>(
    State(state): State<Arc<MatchingState<A, O>>>,
    Path((company_id, advocate_id)): Path<(String, String)>,
    body: Bytes,
) -> Response
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let request: RecordCallRequest = match json_or_default(&body) {
        Ok(request) => request,
        Err(rejection) => return rejection,
    };
    let completed_on = request
        .completed_on
        .unwrap_or_else(|| Utc::now().date_naive());

    match state.service.record_completed_call(
        &CompanyId(company_id),
        &AdvocateId(advocate_id),
        completed_on,
    ) {
        Ok(advocate) => (StatusCode::OK, axum::Json(advocate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn deactivate_handler<A, O>(
    State(state): State<Arc<MatchingState<A, O>>>,
    Path((company_id, advocate_id)): Path<(String, String)>,
) -> Response
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    match state
        .service
        .deactivate_advocate(&CompanyId(company_id), &AdvocateId(advocate_id))
    {
        Ok(advocate) => (StatusCode::OK, axum::Json(advocate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<A, O>(
    State(state): State<Arc<MatchingState<A, O>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    let PreviewRequest {
        opportunity,
        advocates,
        options,
    } = request;
    let options = options.apply(&state.defaults.options);

    let response = state
        .service
        .engine()
        .find_matches(&opportunity, &advocates, &options);
    let insights = aggregate(&response.matches, state.defaults.top_reasons);

    let report = MatchReport {
        opportunity_id: opportunity.id,
        matches: response.matches,
        stats: response.stats,
        insights,
    };
    (StatusCode::OK, axum::Json(report)).into_response()
}
