use crate::cli::ServeArgs;
use crate::infra::{
    build_catalog, build_engine, AppState, CheckerCounter, InMemorySessionRepository,
};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use eligibility_engine::assessment::AssessmentService;
use eligibility_engine::config::AppConfig;
use eligibility_engine::error::AppError;
use eligibility_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let checkers = Arc::new(CheckerCounter::new(config.assessment.checker_counter_base));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        checkers: checkers.clone(),
    };

    let engine = build_engine(&config.assessment)?;
    let catalog = build_catalog(&config.catalog);
    let sessions = Arc::new(InMemorySessionRepository::default());
    let service = Arc::new(AssessmentService::new(engine, sessions, catalog, checkers));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "eligibility assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
