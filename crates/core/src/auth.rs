use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Signed-in dashboard user passed explicitly to every use-case.
///
/// Carries the permission names granted to the user so action gating never
/// reads ambient client storage. Built when a request enters the service and
/// dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    permissions: BTreeSet<String>,
}

impl UserIdentity {
    /// Creates a user identity from the gateway-provided claims.
    #[must_use]
    pub fn new<I, S>(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        permissions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            permissions: permissions
                .into_iter()
                .map(Into::into)
                .map(|permission: String| permission.trim().to_owned())
                .filter(|permission| !permission.is_empty())
                .collect(),
        }
    }

    /// Returns the stable subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns granted permission names in sorted order.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }

    /// Returns whether the user holds the named permission.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Ensures the user holds the named permission.
    pub fn require_permission(&self, permission: &str) -> AppResult<()> {
        if self.has_permission(permission) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' is missing permission '{permission}'",
            self.subject
        )))
    }
}
