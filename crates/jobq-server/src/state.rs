use std::sync::Arc;

use jobq_core::JobLifecycle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The lifecycle engine. The only owner of job state.
    pub engine: Arc<dyn JobLifecycle>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(engine: Arc<dyn JobLifecycle>, config: ServerConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}
