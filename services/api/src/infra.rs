use hiring_portal::config::PortalConfig;
use hiring_portal::error::AppError;
use hiring_portal::workflows::hiring::{ApplicationSnapshot, Stage, StageNavigationController};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn navigation_controller(config: &PortalConfig) -> StageNavigationController {
    StageNavigationController::new(config.notice_ttl())
}

/// Read a fetch payload captured to disk.
pub(crate) fn load_snapshot(path: &Path) -> Result<ApplicationSnapshot, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(ApplicationSnapshot::from_json(&raw)?)
}

pub(crate) fn stage_arg(value: Option<u8>, default: Stage) -> Result<Stage, AppError> {
    match value {
        Some(number) => Ok(Stage::try_from(number)?),
        None => Ok(default),
    }
}
