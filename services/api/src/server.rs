use crate::cli::ServeArgs;
use crate::infra::{
    default_engine_config, seed_demo_roster, AppState, InMemoryLenderDirectory,
    InMemoryMatchRepository,
};
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use lendlocal::config::AppConfig;
use lendlocal::error::AppError;
use lendlocal::telemetry;
use lendlocal::workflows::lending::LoanMatchingService;
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

    let directory = Arc::new(InMemoryLenderDirectory::default());
    if args.seed_demo {
        seed_demo_roster(&directory);
        info!("seeded demo lender roster");
    }
    let matches = Arc::new(InMemoryMatchRepository::default());
    let matching_service = Arc::new(LoanMatchingService::new(
        directory,
        matches,
        default_engine_config(),
    ));

    let app = with_lending_routes(matching_service)
        .layer(Extension(app_state))
        .layer(Extension(config.lending))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lending matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
