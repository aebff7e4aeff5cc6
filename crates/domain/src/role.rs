use serde::{Deserialize, Serialize};
use wisma_core::{AppError, AppResult, NonEmptyString};

use crate::PermissionSelection;

/// Editable role fields as typed into the form, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFields {
    /// Role name.
    pub name: String,
    /// Access level.
    pub level: i32,
}

/// Validated create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDraft {
    name: NonEmptyString,
    level: i32,
    permission_ids: Vec<i64>,
}

impl RoleDraft {
    /// Validates form fields and the selection into a submittable draft.
    pub fn new(fields: &RoleFields, selection: &PermissionSelection) -> AppResult<Self> {
        let name = NonEmptyString::new(fields.name.as_str())
            .map_err(|_| AppError::Validation("role name is required".to_owned()))?;

        if fields.level < 0 {
            return Err(AppError::Validation(format!(
                "role level must be zero or greater, got {}",
                fields.level
            )));
        }

        Ok(Self {
            name,
            level: fields.level,
            permission_ids: selection.to_vec(),
        })
    }

    /// Returns the trimmed role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the access level.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Returns granted permission ids in ascending order.
    #[must_use]
    pub fn permission_ids(&self) -> &[i64] {
        &self.permission_ids
    }
}
