//! Session registry: maps caller-chosen names to live sessions.
//!
//! A session holds mutable per-conversation state, so each one sits
//! behind its own async mutex. Requests for the same session run one at
//! a time; different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::session::SessionClient;

/// Shared handle to one registered session.
pub type SharedSession = Arc<Mutex<SessionClient>>;

/// Thread-safe session registry.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` under `name`. Returns false if the name is taken.
    pub async fn insert(&self, name: &str, client: SessionClient) -> bool {
        let mut map = self.sessions.write().await;
        if map.contains_key(name) {
            return false;
        }
        map.insert(name.to_string(), Arc::new(Mutex::new(client)));
        info!(session = %name, "session registered");
        true
    }

    /// Look up a session. Lock the returned handle to use it.
    pub async fn get(&self, name: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(name).cloned()
    }

    /// Drop a session from the registry. In-flight holders keep their handle.
    pub async fn remove(&self, name: &str) -> Option<SharedSession> {
        let removed = self.sessions.write().await.remove(name);
        if removed.is_some() {
            debug!(session = %name, "session removed");
        }
        removed
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.sessions.read().await.contains_key(name)
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
