use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::monitor::MonitorClient;
use crate::views::Dashboard;

/// Shared handles for the pollers, the clear action and the HTTP routes.
///
/// Writers hold the dashboard lock only for the synchronous render step,
/// never across a request to the monitor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub monitor: Arc<MonitorClient>,
    pub dashboard: Arc<RwLock<Dashboard>>,
}

impl AppState {
    pub fn new(config: Config, monitor: MonitorClient) -> Self {
        let dashboard = Dashboard::new(&config);

        Self {
            config: Arc::new(config),
            monitor: Arc::new(monitor),
            dashboard: Arc::new(RwLock::new(dashboard)),
        }
    }
}
