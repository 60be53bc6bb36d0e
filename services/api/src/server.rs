use crate::cli::ServeArgs;
use crate::infra::{in_memory_portal, AppState};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use trace_portal::config::AppConfig;
use trace_portal::error::AppError;
use trace_portal::telemetry;
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
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let portal = in_memory_portal(config.portal.clone());

    let app = with_portal_routes(portal)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        root_signature = config.portal.root_signature(),
        "trace portal ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
