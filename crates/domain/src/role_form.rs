use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wisma_core::{AppError, AppResult};

use crate::{PermissionNode, PermissionSelection, RoleDraft, RoleFields};

/// Identifier minted each time a role form is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleFormId(Uuid);

impl RoleFormId {
    /// Creates a random form identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a form identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleFormId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleFormId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RoleFormId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid role form id: {error}")))
    }
}

/// Which flow opened the role form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFormMode {
    /// New role.
    Create,
    /// Editing an existing role.
    Update,
    /// Read-only view of an existing role.
    Detail,
}

impl RoleFormMode {
    /// Returns stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Detail => "detail",
        }
    }
}

impl FromStr for RoleFormMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "detail" => Ok(Self::Detail),
            _ => Err(AppError::Validation(format!(
                "unknown role form mode '{value}'"
            ))),
        }
    }
}

/// Role form contents. Each mode owns exactly the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleForm {
    /// Blank form for a new role.
    Create {
        /// Fields typed so far.
        fields: RoleFields,
        /// Ticked permissions.
        selection: PermissionSelection,
    },
    /// Editable form seeded from an existing role.
    Update {
        /// Role being edited.
        role_id: i64,
        /// Fields typed so far.
        fields: RoleFields,
        /// Ticked permissions.
        selection: PermissionSelection,
    },
    /// Read-only view of an existing role.
    Detail {
        /// Role shown.
        role_id: i64,
        /// Role name.
        name: String,
        /// Access level.
        level: i32,
        /// Granted permissions.
        selection: PermissionSelection,
    },
}

impl RoleForm {
    /// Creates an empty create form.
    #[must_use]
    pub fn create() -> Self {
        Self::Create {
            fields: RoleFields::default(),
            selection: PermissionSelection::new(),
        }
    }

    /// Creates an update form seeded from a stored role.
    #[must_use]
    pub fn update(
        role_id: i64,
        name: impl Into<String>,
        level: i32,
        selection: PermissionSelection,
    ) -> Self {
        Self::Update {
            role_id,
            fields: RoleFields {
                name: name.into(),
                level,
            },
            selection,
        }
    }

    /// Creates a read-only detail form.
    #[must_use]
    pub fn detail(
        role_id: i64,
        name: impl Into<String>,
        level: i32,
        selection: PermissionSelection,
    ) -> Self {
        Self::Detail {
            role_id,
            name: name.into(),
            level,
            selection,
        }
    }

    /// Returns the opening flow.
    #[must_use]
    pub fn mode(&self) -> RoleFormMode {
        match self {
            Self::Create { .. } => RoleFormMode::Create,
            Self::Update { .. } => RoleFormMode::Update,
            Self::Detail { .. } => RoleFormMode::Detail,
        }
    }

    /// Returns the stored role id for update and detail forms.
    #[must_use]
    pub fn role_id(&self) -> Option<i64> {
        match self {
            Self::Create { .. } => None,
            Self::Update { role_id, .. } | Self::Detail { role_id, .. } => Some(*role_id),
        }
    }

    /// Returns the current role name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create { fields, .. } | Self::Update { fields, .. } => fields.name.as_str(),
            Self::Detail { name, .. } => name.as_str(),
        }
    }

    /// Returns the current access level.
    #[must_use]
    pub fn level(&self) -> i32 {
        match self {
            Self::Create { fields, .. } | Self::Update { fields, .. } => fields.level,
            Self::Detail { level, .. } => *level,
        }
    }

    /// Returns the ticked permissions.
    #[must_use]
    pub fn selection(&self) -> &PermissionSelection {
        match self {
            Self::Create { selection, .. }
            | Self::Update { selection, .. }
            | Self::Detail { selection, .. } => selection,
        }
    }

    /// Returns whether clicks and edits are ignored.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }

    fn set_fields(&mut self, next: RoleFields) -> AppResult<()> {
        match self {
            Self::Create { fields, .. } | Self::Update { fields, .. } => {
                *fields = next;
                Ok(())
            }
            Self::Detail { .. } => Err(AppError::Validation(
                "role detail form is read-only".to_owned(),
            )),
        }
    }

    fn toggle(&mut self, node: &PermissionNode) -> bool {
        match self {
            Self::Create { selection, .. } | Self::Update { selection, .. } => {
                *selection = selection.toggled(node);
                true
            }
            Self::Detail { .. } => false,
        }
    }

    fn pending_submission(&self) -> AppResult<PendingSubmission> {
        match self {
            Self::Create { fields, selection } => {
                Ok(PendingSubmission::Create(RoleDraft::new(fields, selection)?))
            }
            Self::Update {
                role_id,
                fields,
                selection,
            } => Ok(PendingSubmission::Update {
                role_id: *role_id,
                draft: RoleDraft::new(fields, selection)?,
            }),
            Self::Detail { .. } => Err(AppError::Validation(
                "role detail form cannot be submitted".to_owned(),
            )),
        }
    }
}

/// Backend call selected for a confirmed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitType {
    /// Create a role.
    Create,
    /// Update a role.
    Update,
    /// Delete a role.
    Delete,
}

impl SubmitType {
    /// Returns stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Submission awaiting confirmation or in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSubmission {
    /// Create a role from the draft.
    Create(RoleDraft),
    /// Replace a stored role with the draft.
    Update {
        /// Role being replaced.
        role_id: i64,
        /// New contents.
        draft: RoleDraft,
    },
    /// Delete a stored role.
    Delete {
        /// Role being deleted.
        role_id: i64,
        /// Role name shown in the confirmation.
        role_name: String,
    },
}

impl PendingSubmission {
    /// Returns the backend call this submission performs.
    #[must_use]
    pub fn submit_type(&self) -> SubmitType {
        match self {
            Self::Create(_) => SubmitType::Create,
            Self::Update { .. } => SubmitType::Update,
            Self::Delete { .. } => SubmitType::Delete,
        }
    }

    /// Returns the question shown before the call fires.
    #[must_use]
    pub fn confirmation_message(&self) -> String {
        match self {
            Self::Create(draft) => format!(
                "Create role '{}' with {} permission(s)?",
                draft.name(),
                draft.permission_ids().len()
            ),
            Self::Update { draft, .. } => format!(
                "Save changes to role '{}' with {} permission(s)?",
                draft.name(),
                draft.permission_ids().len()
            ),
            Self::Delete { role_name, .. } => {
                format!("Delete role '{role_name}'? This cannot be undone.")
            }
        }
    }

    /// Returns the notice shown after the call succeeded.
    #[must_use]
    pub fn success_message(&self) -> String {
        match self {
            Self::Create(draft) => format!("Role '{}' created.", draft.name()),
            Self::Update { draft, .. } => format!("Role '{}' updated.", draft.name()),
            Self::Delete { role_name, .. } => format!("Role '{role_name}' deleted."),
        }
    }
}

/// Coarse lifecycle position of a role form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFormPhase {
    /// Nothing open.
    Idle,
    /// Form shown and editable (or read-only for detail).
    Open,
    /// Confirmation dialog shown.
    Confirming,
    /// Backend call in flight.
    Submitting,
}

impl RoleFormPhase {
    /// Returns stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Open => "open",
            Self::Confirming => "confirming",
            Self::Submitting => "submitting",
        }
    }
}

/// Role form lifecycle: `Idle → Open → Confirming → Submitting → Idle`.
///
/// Delete confirmations start from `Idle` and carry no form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleFormState {
    /// Nothing open.
    #[default]
    Idle,
    /// Form shown.
    Open(RoleForm),
    /// Confirmation dialog shown.
    Confirming {
        /// Form to return to on cancel or failure.
        form: Option<RoleForm>,
        /// Submission awaiting confirmation.
        pending: PendingSubmission,
    },
    /// Backend call in flight.
    Submitting {
        /// Form to return to on failure.
        form: Option<RoleForm>,
        /// Submission in flight.
        pending: PendingSubmission,
    },
}

impl RoleFormState {
    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RoleFormPhase {
        match self {
            Self::Idle => RoleFormPhase::Idle,
            Self::Open(_) => RoleFormPhase::Open,
            Self::Confirming { .. } => RoleFormPhase::Confirming,
            Self::Submitting { .. } => RoleFormPhase::Submitting,
        }
    }

    /// Returns the form, including one kept behind a confirmation.
    #[must_use]
    pub fn form(&self) -> Option<&RoleForm> {
        match self {
            Self::Idle => None,
            Self::Open(form) => Some(form),
            Self::Confirming { form, .. } | Self::Submitting { form, .. } => form.as_ref(),
        }
    }

    /// Returns the submission awaiting confirmation or in flight.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingSubmission> {
        match self {
            Self::Idle | Self::Open(_) => None,
            Self::Confirming { pending, .. } | Self::Submitting { pending, .. } => Some(pending),
        }
    }

    /// Shows a form, replacing any form that is open but not confirming.
    pub fn open(&mut self, form: RoleForm) -> AppResult<()> {
        match self {
            Self::Idle | Self::Open(_) => {
                *self = Self::Open(form);
                Ok(())
            }
            _ => Err(self.unexpected_phase("open a role form")),
        }
    }

    /// Discards the form and its selection.
    pub fn close(&mut self) -> AppResult<()> {
        if matches!(self, Self::Submitting { .. }) {
            return Err(self.unexpected_phase("close the role form"));
        }

        *self = Self::Idle;
        Ok(())
    }

    /// Replaces the typed fields of a create or update form.
    pub fn set_fields(&mut self, fields: RoleFields) -> AppResult<()> {
        let Self::Open(form) = self else {
            return Err(self.unexpected_phase("edit role fields"));
        };

        form.set_fields(fields)
    }

    /// Applies a click on `node`; returns `false` when the form is read-only.
    pub fn toggle_permission(&mut self, node: &PermissionNode) -> AppResult<bool> {
        let Self::Open(form) = self else {
            return Err(self.unexpected_phase("toggle a permission"));
        };

        Ok(form.toggle(node))
    }

    /// Validates the open form and asks for confirmation.
    pub fn request_submit(&mut self) -> AppResult<String> {
        let Self::Open(form) = self else {
            return Err(self.unexpected_phase("submit the role form"));
        };

        let pending = form.pending_submission()?;
        let message = pending.confirmation_message();
        let form = form.clone();
        *self = Self::Confirming {
            form: Some(form),
            pending,
        };

        Ok(message)
    }

    /// Asks for confirmation before deleting a stored role.
    pub fn request_delete(
        &mut self,
        role_id: i64,
        role_name: impl Into<String>,
    ) -> AppResult<String> {
        if !matches!(self, Self::Idle) {
            return Err(self.unexpected_phase("delete a role"));
        }

        let pending = PendingSubmission::Delete {
            role_id,
            role_name: role_name.into(),
        };
        let message = pending.confirmation_message();
        *self = Self::Confirming {
            form: None,
            pending,
        };

        Ok(message)
    }

    /// Dismisses the confirmation dialog.
    pub fn cancel_confirmation(&mut self) -> AppResult<()> {
        match std::mem::take(self) {
            Self::Confirming { form, .. } => {
                *self = form.map_or(Self::Idle, Self::Open);
                Ok(())
            }
            other => {
                let error = other.unexpected_phase("cancel a confirmation");
                *self = other;
                Err(error)
            }
        }
    }

    /// Marks the confirmed submission as in flight and returns it.
    pub fn begin_submit(&mut self) -> AppResult<PendingSubmission> {
        match std::mem::take(self) {
            Self::Confirming { form, pending } => {
                *self = Self::Submitting {
                    form,
                    pending: pending.clone(),
                };
                Ok(pending)
            }
            other => {
                let error = other.unexpected_phase("confirm a submission");
                *self = other;
                Err(error)
            }
        }
    }

    /// Finishes a successful call and returns the success notice.
    pub fn complete_success(&mut self) -> AppResult<String> {
        match std::mem::take(self) {
            Self::Submitting { pending, .. } => Ok(pending.success_message()),
            other => {
                let error = other.unexpected_phase("complete a submission");
                *self = other;
                Err(error)
            }
        }
    }

    /// Finishes a failed call, restoring the form with its selection.
    pub fn complete_failure(&mut self) -> AppResult<()> {
        match std::mem::take(self) {
            Self::Submitting { form, .. } => {
                *self = form.map_or(Self::Idle, Self::Open);
                Ok(())
            }
            other => {
                let error = other.unexpected_phase("complete a submission");
                *self = other;
                Err(error)
            }
        }
    }

    fn unexpected_phase(&self, action: &str) -> AppError {
        AppError::Conflict(format!(
            "cannot {action} while the role form is {}",
            self.phase().as_str()
        ))
    }
}
