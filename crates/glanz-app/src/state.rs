use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use glanz_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Set while an import is enriching words
    pub import_running: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            import_running: AtomicBool::new(false),
        }
    }
}
