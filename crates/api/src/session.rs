//! Server-side workspace sessions.
//!
//! Each researcher login opens a session holding the chosen location and
//! the ARC being worked on. The session id travels in the access token;
//! handlers read and change session state only through [`SessionStore`].

use std::collections::HashMap;

use chrono::Duration;

use palp_core::location::Location;
use palp_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSession {
    pub location: Location,
    /// ARC selected for description work.
    pub current_arc: Option<String>,
    pub created_at: Timestamp,
}

impl WorkspaceSession {
    fn new() -> Self {
        Self {
            location: Location::default(),
            current_arc: None,
            created_at: chrono::Utc::now(),
        }
    }
}

/// All open workspace sessions.
///
/// Thread-safe via interior `RwLock`; wrapped in `Arc` and shared through
/// the application state. A session lives as long as the access token that
/// carries its id; older entries read as closed and are evicted whenever a
/// new session opens.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, WorkspaceSession>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::default(),
            ttl,
        }
    }

    fn is_live(&self, session: &WorkspaceSession, now: Timestamp) -> bool {
        now - session.created_at < self.ttl
    }

    /// Open a new empty session and return its id.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.created_at < self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted expired workspace sessions");
        }
        sessions.insert(id.clone(), WorkspaceSession::new());

        tracing::debug!(session_id = %id, "Opened workspace session");
        id
    }

    /// Whether `id` names an open, unexpired session.
    pub async fn contains(&self, id: &str) -> bool {
        self.get(id).await.is_some()
    }

    /// Snapshot of an open session.
    pub async fn get(&self, id: &str) -> Option<WorkspaceSession> {
        let now = chrono::Utc::now();
        self.sessions
            .read()
            .await
            .get(id)
            .filter(|session| self.is_live(session, now))
            .cloned()
    }

    /// Choose a new location. Clears the current ARC. Closed sessions are
    /// left alone and yield `None`.
    pub async fn set_location(&self, id: &str, location: Location) -> Option<WorkspaceSession> {
        self.update(id, |session| {
            session.location = location;
            session.current_arc = None;
        })
        .await
    }

    pub async fn set_current_arc(&self, id: &str, arc: &str) -> Option<WorkspaceSession> {
        self.update(id, |session| session.current_arc = Some(arc.to_string()))
            .await
    }

    async fn update(
        &self,
        id: &str,
        change: impl FnOnce(&mut WorkspaceSession),
    ) -> Option<WorkspaceSession> {
        let now = chrono::Utc::now();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .filter(|session| now - session.created_at < self.ttl)?;
        change(session);
        Some(session.clone())
    }

    pub async fn remove(&self, id: &str) {
        if self.sessions.write().await.remove(id).is_some() {
            tracing::debug!(session_id = %id, "Closed workspace session");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
