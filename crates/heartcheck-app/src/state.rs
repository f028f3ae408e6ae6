use crate::config::AppConfig;
use heartcheck_classifiers::{LoadResult, ModelCache};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Process-lifetime classifier artifact
    pub model: &'static ModelCache,
}

impl AppState {
    pub fn new(config: AppConfig, model: &'static ModelCache) -> Self {
        Self {
            config: Arc::new(config),
            model,
        }
    }

    /// The cached load result, loading on first use
    pub fn load_result(&self) -> &'static LoadResult {
        self.model.get_or_load()
    }
}
