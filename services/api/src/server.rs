use crate::cli::ServeArgs;
use crate::infra::{
    read_snapshot, seed_repositories, AppState, InMemoryAdvocateRepository,
    InMemoryOpportunityRepository,
};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use peerchamps::config::AppConfig;
use peerchamps::error::AppError;
use peerchamps::matching::{MatchingServiceError, ReferenceMatchingService, ScoringConfig};
use peerchamps::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let advocates = Arc::new(InMemoryAdvocateRepository::default());
    let opportunities = Arc::new(InMemoryOpportunityRepository::default());
    if let Some(path) = args.snapshot.take() {
        let snapshot = read_snapshot(&path)?;
        let company = snapshot.company_id.clone();
        seed_repositories(snapshot, &advocates, &opportunities)
            .map_err(MatchingServiceError::from)?;
        info!(company = %company, path = %path.display(), "seeded stores from snapshot");
    }

    let service = Arc::new(ReferenceMatchingService::new(
        advocates,
        opportunities,
        ScoringConfig::default(),
    ));

    let app = with_matching_routes(service, config.matching.defaults())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "peerchamps matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
