//! In-memory session registry.
//!
//! Each uploaded file gets one [`SessionState`] behind its own mutex,
//! so concurrent sessions are fully independent and a single session
//! sees strictly serialized mutations (one interaction at a time, as
//! the dashboard model requires). Sessions live until explicitly
//! deleted or the process exits; there is no cross-session sharing
//! and no persistence beyond the explicit exports and the sink.

use std::collections::HashMap;
use std::sync::Arc;

use briq_core::error::CoreError;
use briq_core::session::SessionState;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Concurrent map of live sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session, returning its id.
    pub async fn insert(&self, session: SessionState) -> Uuid {
        let id = Uuid::now_v7();
        self.inner
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Look up a session handle, or a `NotFound` domain error.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, CoreError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Session",
                id: id.to_string(),
            })
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
