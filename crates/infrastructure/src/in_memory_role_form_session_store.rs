use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use wisma_application::{RoleFormSession, RoleFormSessionStore};
use wisma_core::AppResult;

/// Process-local role form store keyed by subject.
#[derive(Debug, Default)]
pub struct InMemoryRoleFormSessionStore {
    sessions: RwLock<HashMap<String, RoleFormSession>>,
}

impl InMemoryRoleFormSessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleFormSessionStore for InMemoryRoleFormSessionStore {
    async fn load(&self, subject: &str) -> AppResult<Option<RoleFormSession>> {
        Ok(self.sessions.read().await.get(subject).cloned())
    }

    async fn save(&self, subject: &str, session: RoleFormSession) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .insert(subject.to_owned(), session);
        Ok(())
    }

    async fn remove(&self, subject: &str) -> AppResult<()> {
        self.sessions.write().await.remove(subject);
        Ok(())
    }
}
