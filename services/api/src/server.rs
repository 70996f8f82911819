use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use mindcheck::config::AppConfig;
use mindcheck::error::AppError;
use mindcheck::screening::notify::webhook::UnverifiedWebhooks;
use mindcheck::screening::{
    LineMessagingClient, ScreeningApi, ScreeningService, StaticCredentialGate,
};
use mindcheck::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryScreeningRepository};
use crate::routes::with_screening_routes;

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
        webhook: Arc::new(UnverifiedWebhooks),
    };

    let repository = Arc::new(InMemoryScreeningRepository::default());
    let gateway = Arc::new(LineMessagingClient::new());
    let service = Arc::new(ScreeningService::new(
        repository,
        gateway,
        config.notify.clone(),
    ));
    let history = Arc::new(StaticCredentialGate::new(&config.history));

    let app = with_screening_routes(ScreeningApi { service, history })
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "screening intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
