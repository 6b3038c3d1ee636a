use crate::config::ServerConfig;
use finagent_market::QueryHandler;
use finagent_utils::Config;
use std::sync::Arc;

/// Shared, read-only state handed to every route
#[derive(Debug, Clone)]
pub struct AppState {
    pub handler: Arc<QueryHandler>,
    pub config: Arc<ServerConfig>,
    pub app: Arc<Config>,
}

impl AppState {
    pub fn new(handler: Arc<QueryHandler>, config: ServerConfig, app: Config) -> Self {
        Self {
            handler,
            config: Arc::new(config),
            app: Arc::new(app),
        }
    }
}
