use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use peerchamps::matching::{
    matching_router, AdvocateRepository, MatchingDefaults, OpportunityRepository,
    ReferenceMatchingService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_matching_routes<A, O>(
    service: Arc<ReferenceMatchingService<A, O>>,
    defaults: MatchingDefaults,
) -> axum::Router
where
    A: AdvocateRepository + 'static,
    O: OpportunityRepository + 'static,
{
    matching_router(service, defaults)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryAdvocateRepository, InMemoryOpportunityRepository};
    use peerchamps::matching::ScoringConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn preview_route_is_mounted_alongside_health() {
        let service = Arc::new(ReferenceMatchingService::new(
            Arc::new(InMemoryAdvocateRepository::default()),
            Arc::new(InMemoryOpportunityRepository::default()),
            ScoringConfig::default(),
        ));
        let router = with_matching_routes(service, MatchingDefaults::default());

        let payload = json!({
            "opportunity": {
                "id": "opp-1",
                "company_id": "acme",
                "name": "Initech expansion"
            },
            "advocates": []
        });
        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/matching/preview")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(value["stats"]["matches_found"], 0);
        assert_eq!(value["stats"]["average_score"], 0.0);
    }
}
