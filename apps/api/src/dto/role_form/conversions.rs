use wisma_application::{RoleFormSession, SubmissionOutcome};
use wisma_domain::PendingSubmission;

use crate::dto::{PermissionNodeResponse, RoleResponse};

use super::types::{RoleFormResponse, SubmissionOutcomeResponse};

impl From<RoleFormSession> for RoleFormResponse {
    fn from(value: RoleFormSession) -> Self {
        let form = value.state.form();

        Self {
            form_id: value.form_id.to_string(),
            phase: value.state.phase().as_str().to_owned(),
            mode: form.map(|form| form.mode().as_str().to_owned()),
            role_id: form.and_then(|form| form.role_id()).or_else(|| {
                value.state.pending().and_then(|pending| match pending {
                    PendingSubmission::Delete { role_id, .. } => Some(*role_id),
                    _ => None,
                })
            }),
            name: form.map(|form| form.name().to_owned()).unwrap_or_default(),
            level: form.map(|form| form.level()).unwrap_or_default(),
            read_only: form.is_some_and(|form| form.is_read_only()),
            selected_permission_ids: form
                .map(|form| form.selection().to_vec())
                .unwrap_or_default(),
            permission_tree: value
                .tree
                .roots()
                .iter()
                .map(PermissionNodeResponse::from)
                .collect(),
            pending_submit_type: value
                .state
                .pending()
                .map(|pending| pending.submit_type().as_str().to_owned()),
            confirmation_message: value.confirmation_message(),
            opened_at: value.opened_at.to_rfc3339(),
        }
    }
}

impl From<SubmissionOutcome> for SubmissionOutcomeResponse {
    fn from(value: SubmissionOutcome) -> Self {
        Self {
            submit_type: value.submit_type.as_str().to_owned(),
            message: value.message,
            role: value.role.map(RoleResponse::from),
        }
    }
}
