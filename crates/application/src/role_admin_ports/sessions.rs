use async_trait::async_trait;
use chrono::{DateTime, Utc};

use wisma_core::AppResult;
use wisma_domain::{PermissionTree, RoleFormId, RoleFormState};

/// Role form owned by one signed-in subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFormSession {
    /// Identifier minted when the form was opened.
    pub form_id: RoleFormId,
    /// Hierarchy built from the catalog fetched for this form.
    pub tree: PermissionTree,
    /// Lifecycle state.
    pub state: RoleFormState,
    /// Time the form was opened.
    pub opened_at: DateTime<Utc>,
}

impl RoleFormSession {
    /// Starts a session with a fresh form id.
    #[must_use]
    pub fn new(tree: PermissionTree, state: RoleFormState) -> Self {
        Self {
            form_id: RoleFormId::new(),
            tree,
            state,
            opened_at: Utc::now(),
        }
    }

    /// Returns the question to show while a submission awaits confirmation.
    #[must_use]
    pub fn confirmation_message(&self) -> Option<String> {
        match &self.state {
            RoleFormState::Confirming { pending, .. } => Some(pending.confirmation_message()),
            _ => None,
        }
    }
}

/// Store port keeping at most one role form per subject.
#[async_trait]
pub trait RoleFormSessionStore: Send + Sync {
    /// Loads the subject's role form, if any.
    async fn load(&self, subject: &str) -> AppResult<Option<RoleFormSession>>;

    /// Stores the subject's role form, replacing any previous one.
    async fn save(&self, subject: &str, session: RoleFormSession) -> AppResult<()>;

    /// Drops the subject's role form.
    async fn remove(&self, subject: &str) -> AppResult<()>;
}
