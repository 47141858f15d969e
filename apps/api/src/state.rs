use std::sync::Arc;

use crate::cache::InsightCache;
use crate::config::Config;
use crate::generation::generator::InsightGenerator;
use crate::profiles::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: Arc<InsightGenerator>,
    /// `None` when ENABLE_CACHE is off.
    pub cache: Option<Arc<dyn InsightCache>>,
    /// Only consulted when ENABLE_USER_PROFILES is on.
    pub profiles: Arc<dyn ProfileStore>,
}
