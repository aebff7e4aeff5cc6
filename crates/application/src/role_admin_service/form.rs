use super::*;

use wisma_domain::RoleFields;

use super::catalog::unknown_permission;

impl RoleAdminService {
    /// Opens an empty create form, replacing any open form.
    pub async fn open_create_form(&self, actor: &UserIdentity) -> AppResult<RoleFormSession> {
        AdminPermission::RoleCreate.require(actor)?;

        let tree = self.build_tree().await?;
        self.open_form(actor, tree, RoleForm::create()).await
    }

    /// Opens an edit form seeded from a stored role.
    pub async fn open_update_form(
        &self,
        actor: &UserIdentity,
        role_id: i64,
    ) -> AppResult<RoleFormSession> {
        AdminPermission::RoleUpdate.require(actor)?;

        let tree = self.build_tree().await?;
        let role = self.find_role(role_id).await?;
        let form = RoleForm::update(role.id, role.name.as_str(), role.level, role.selection());

        self.open_form(actor, tree, form).await
    }

    /// Opens a read-only view of a stored role.
    pub async fn open_detail_form(
        &self,
        actor: &UserIdentity,
        role_id: i64,
    ) -> AppResult<RoleFormSession> {
        AdminPermission::RoleRead.require(actor)?;

        let tree = self.build_tree().await?;
        let role = self.find_role(role_id).await?;
        let form = RoleForm::detail(role.id, role.name.as_str(), role.level, role.selection());

        self.open_form(actor, tree, form).await
    }

    /// Returns the caller's role form, if any.
    pub async fn current_form(&self, actor: &UserIdentity) -> AppResult<Option<RoleFormSession>> {
        self.sessions.load(actor.subject()).await
    }

    /// Discards the caller's role form and its selection.
    pub async fn close_form(&self, actor: &UserIdentity, form_id: RoleFormId) -> AppResult<()> {
        let _guard = self.lock_form(actor).await;
        let mut session = self.load_session(actor, form_id).await?;
        session.state.close()?;
        self.sessions.remove(actor.subject()).await
    }

    /// Replaces the typed name and level of a create or update form.
    pub async fn update_fields(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
        fields: RoleFields,
    ) -> AppResult<RoleFormSession> {
        let _guard = self.lock_form(actor).await;
        let mut session = self.load_session(actor, form_id).await?;
        if let Some(form) = session.state.form() {
            permission_for_mode(form.mode()).require(actor)?;
        }

        session.state.set_fields(fields)?;
        self.sessions
            .save(actor.subject(), session.clone())
            .await?;

        Ok(session)
    }

    /// Applies a click on a permission checkbox of the open form.
    ///
    /// Clicks on a read-only form leave the selection untouched.
    pub async fn toggle_permission(
        &self,
        actor: &UserIdentity,
        form_id: RoleFormId,
        permission_id: i64,
    ) -> AppResult<RoleFormSession> {
        let _guard = self.lock_form(actor).await;
        let mut session = self.load_session(actor, form_id).await?;
        if let Some(form) = session.state.form() {
            permission_for_mode(form.mode()).require(actor)?;
        }

        let node = session
            .tree
            .find(permission_id)
            .ok_or_else(|| unknown_permission(permission_id))?;

        if session.state.toggle_permission(node)? {
            self.sessions
                .save(actor.subject(), session.clone())
                .await?;
        }

        Ok(session)
    }
}
