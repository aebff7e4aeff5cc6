use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wisma_core::{AppError, AppResult, UserIdentity};

/// Dashboard permissions gating role administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminPermission {
    /// Allows listing roles and opening the read-only detail form.
    RoleRead,
    /// Allows creating roles.
    RoleCreate,
    /// Allows editing roles and their grants.
    RoleUpdate,
    /// Allows deleting roles.
    RoleDelete,
}

impl AdminPermission {
    /// Returns the permission name as granted by the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleRead => "role.read",
            Self::RoleCreate => "role.create",
            Self::RoleUpdate => "role.update",
            Self::RoleDelete => "role.delete",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AdminPermission] = &[
            AdminPermission::RoleRead,
            AdminPermission::RoleCreate,
            AdminPermission::RoleUpdate,
            AdminPermission::RoleDelete,
        ];

        ALL
    }

    /// Ensures the actor holds this permission.
    pub fn require(self, actor: &UserIdentity) -> AppResult<()> {
        actor.require_permission(self.as_str())
    }

    /// Returns the subset of permissions the actor holds, for gating buttons.
    #[must_use]
    pub fn granted_to(actor: &UserIdentity) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|permission| actor.has_permission(permission.as_str()))
            .collect()
    }
}

impl FromStr for AdminPermission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "role.read" => Ok(Self::RoleRead),
            "role.create" => Ok(Self::RoleCreate),
            "role.update" => Ok(Self::RoleUpdate),
            "role.delete" => Ok(Self::RoleDelete),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}
