use std::sync::Arc;

use briq_core::sink::AnnotationSink;

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Live upload sessions.
    pub sessions: SessionStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Optional best-effort annotation sink; `None` when no
    /// `DATABASE_URL` is configured.
    pub sink: Option<Arc<dyn AnnotationSink>>,
    /// Pool backing the sink, kept for the health probe.
    pub pool: Option<briq_db::DbPool>,
}

impl AppState {
    /// State for a sink-less service (also used by integration tests).
    pub fn without_sink(config: ServerConfig) -> Self {
        Self {
            sessions: SessionStore::new(),
            config: Arc::new(config),
            sink: None,
            pool: None,
        }
    }
}
