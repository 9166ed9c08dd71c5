//! State shared by every dashboard handler.

use std::sync::Arc;

use momentum_traits::ReturnsSource;

use crate::{config::DashboardConfig, pipeline::ReturnsCache};

/// Shared application state, passed to every handler via `axum::extract::State`.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) config: DashboardConfig,
    pub(crate) source: Arc<dyn ReturnsSource>,
    /// Returns of the last stock shown, reused while the symbol is unchanged.
    pub(crate) cache: ReturnsCache,
}

impl AppState {
    pub(crate) fn new(config: DashboardConfig, source: Arc<dyn ReturnsSource>) -> Arc<Self> {
        Arc::new(Self {
            config,
            source,
            cache: ReturnsCache::new(),
        })
    }
}
