use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    /// Endpoint chosen at startup; the shell may replace it at runtime.
    pub endpoint: String,
    pub log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, endpoint: String) -> Self {
        Self {
            config,
            endpoint,
            log_guard: None,
        }
    }
}
