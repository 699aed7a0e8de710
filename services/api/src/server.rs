use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryAwardRepository};
use crate::routes::with_portal_routes;
use award_desk::applications::ApplicationService;
use award_desk::awards::{AwardCatalogue, AwardCsvImporter};
use award_desk::config::AppConfig;
use award_desk::error::AppError;
use award_desk::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let awards = match &config.catalogue.seed_csv {
        Some(path) => AwardCsvImporter::from_path(path)?,
        None => Vec::new(),
    };
    let award_store = Arc::new(InMemoryAwardRepository::seeded(awards));
    let catalogue = Arc::new(AwardCatalogue::new(award_store.clone()));
    let applications = Arc::new(ApplicationService::new(
        award_store,
        Arc::new(InMemoryApplicationRepository::default()),
    ));

    let app = with_portal_routes(catalogue, applications)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "award portal backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
