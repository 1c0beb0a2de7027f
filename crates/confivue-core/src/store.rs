//! In-memory session repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::session::Session;
use crate::traits::{SessionGuard, SessionRepository};

/// Process-lifetime session store.
///
/// The outer map lock is held only long enough to find or insert an entry;
/// each session has its own mutex for read-modify-write.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn insert(&self, session: Session) {
        let id = session.id.clone();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
    }

    async fn checkout(&self, id: &str) -> Option<SessionGuard> {
        let entry = self.entry(id).await?;
        Some(entry.lock_owned().await)
    }

    async fn snapshot(&self, id: &str) -> Option<Session> {
        let entry = self.entry(id).await?;
        let session = entry.lock().await;
        Some(session.clone())
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
