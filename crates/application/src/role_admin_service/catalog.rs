use super::*;

use wisma_domain::{PermissionSelection, toggle_selection};

use crate::role_admin_ports::{RoleListQuery, RolePage};

impl RoleAdminService {
    /// Returns the permission hierarchy built from a fresh catalog fetch.
    pub async fn permission_tree(&self, actor: &UserIdentity) -> AppResult<PermissionTree> {
        AdminPermission::RoleRead.require(actor)?;
        self.build_tree().await
    }

    /// Applies a click on `permission_id` to a selection held by the caller.
    pub async fn toggle_selection(
        &self,
        actor: &UserIdentity,
        selected: &PermissionSelection,
        permission_id: i64,
    ) -> AppResult<PermissionSelection> {
        AdminPermission::RoleRead.require(actor)?;

        let tree = self.build_tree().await?;
        let node = tree.find(permission_id).ok_or_else(|| unknown_permission(permission_id))?;

        Ok(toggle_selection(selected, node))
    }

    /// Lists roles for the listing table.
    pub async fn list_roles(
        &self,
        actor: &UserIdentity,
        query: RoleListQuery,
    ) -> AppResult<RolePage> {
        AdminPermission::RoleRead.require(actor)?;
        self.roles.list_roles(&query.normalized()).await
    }
}

pub(super) fn unknown_permission(permission_id: i64) -> AppError {
    AppError::NotFound(format!("permission {permission_id} is not in the catalog"))
}
