//! Shared application state for all routes.

use crate::config::ApiConfig;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Lives from process startup to shutdown; handlers keep nothing else between requests.
    pub store: Arc<dyn Store>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
