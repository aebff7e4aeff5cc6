use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use wisma_core::{AppError, AppResult, UserIdentity};
use wisma_domain::{
    AdminPermission, PermissionTree, RoleForm, RoleFormId, RoleFormMode, SubmitType,
};

use crate::role_admin_ports::{
    PermissionCatalogRepository, Role, RoleFormSession, RoleFormSessionStore, RoleRepository,
};

mod catalog;
mod form;
mod submission;

#[cfg(test)]
mod tests;

/// Result of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Backend call that was performed.
    pub submit_type: SubmitType,
    /// Notice to show the user.
    pub message: String,
    /// Stored role for create and update calls.
    pub role: Option<Role>,
}

/// Application service for the role administration screen.
#[derive(Clone)]
pub struct RoleAdminService {
    catalog: Arc<dyn PermissionCatalogRepository>,
    roles: Arc<dyn RoleRepository>,
    sessions: Arc<dyn RoleFormSessionStore>,
    form_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn PermissionCatalogRepository>,
        roles: Arc<dyn RoleRepository>,
        sessions: Arc<dyn RoleFormSessionStore>,
    ) -> Self {
        Self {
            catalog,
            roles,
            sessions,
            form_locks: Arc::default(),
        }
    }

    /// Serialises load, transition and save of one subject's role form.
    async fn lock_form(&self, actor: &UserIdentity) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.form_locks.lock().await;
            Arc::clone(locks.entry(actor.subject().to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    async fn build_tree(&self) -> AppResult<PermissionTree> {
        let records = self.catalog.fetch_all_permissions().await?;
        let tree = PermissionTree::build(&records);

        for record in tree.unresolved() {
            tracing::warn!(
                permission_id = record.id(),
                permission_name = record.name(),
                parent = record.parent().unwrap_or_default(),
                "permission parent does not resolve to a root; left out of the tree"
            );
        }

        Ok(tree)
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Role> {
        self.roles
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role {role_id} does not exist")))
    }

    async fn load_session(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
    ) -> AppResult<RoleFormSession> {
        let session = self
            .sessions
            .load(actor.subject())
            .await?
            .ok_or_else(|| stale_form(form_id))?;

        if session.form_id != form_id {
            return Err(stale_form(form_id));
        }

        Ok(session)
    }

    async fn open_form(
        &self,
        actor: &UserIdentity,
        tree: PermissionTree,
        form: RoleForm,
    ) -> AppResult<RoleFormSession> {
        let _guard = self.lock_form(actor).await;
        let mut state = self
            .sessions
            .load(actor.subject())
            .await?
            .map(|session| session.state)
            .unwrap_or_default();
        state.open(form)?;

        let session = RoleFormSession::new(tree, state);
        self.sessions
            .save(actor.subject(), session.clone())
            .await?;

        tracing::debug!(
            subject = actor.subject(),
            form_id = %session.form_id,
            "role form opened"
        );

        Ok(session)
    }
}

fn stale_form(form_id: RoleFormId) -> AppError {
    AppError::Conflict(format!("role form '{form_id}' is no longer open"))
}

fn permission_for_mode(mode: RoleFormMode) -> AdminPermission {
    match mode {
        RoleFormMode::Create => AdminPermission::RoleCreate,
        RoleFormMode::Update => AdminPermission::RoleUpdate,
        RoleFormMode::Detail => AdminPermission::RoleRead,
    }
}

fn permission_for_submit(submit_type: SubmitType) -> AdminPermission {
    match submit_type {
        SubmitType::Create => AdminPermission::RoleCreate,
        SubmitType::Update => AdminPermission::RoleUpdate,
        SubmitType::Delete => AdminPermission::RoleDelete,
    }
}
