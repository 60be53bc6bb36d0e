use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use trace_portal::config::PortalConfig;
use trace_portal::portal::{MemoryPortalRepository, PortalService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryPortalService = PortalService<MemoryPortalRepository>;

pub(crate) fn in_memory_portal(config: PortalConfig) -> Arc<MemoryPortalService> {
    let repository = Arc::new(MemoryPortalRepository::default());
    Arc::new(PortalService::new(repository, config))
}
