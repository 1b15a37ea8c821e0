use std::sync::Arc;

use crate::backend_client::AnalysisBackend;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis service. Default: `BackendClient` over HTTP; tests swap in a fake.
    pub backend: Arc<dyn AnalysisBackend>,
    pub config: Config,
}
