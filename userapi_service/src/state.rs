use crate::config::ServiceConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use userapi_core::DynUserStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub users: DynUserStore,
    start_time: Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig, users: DynUserStore) -> Self {
        Self {
            config: Arc::new(config),
            users,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn diagnostics(&self) -> bool {
        self.config.diagnostics
    }
}
