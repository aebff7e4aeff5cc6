use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::{PermissionNodeResponse, RoleResponse};

/// Incoming payload opening a role form.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/open-role-form-request.ts"
)]
pub struct OpenRoleFormRequest {
    /// `create`, `update` or `detail`.
    pub mode: String,
    #[ts(type = "number | null")]
    pub role_id: Option<i64>,
}

/// Reference to the caller's open form.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/form-ref-request.ts"
)]
pub struct FormRefRequest {
    pub form_id: String,
}

/// Incoming payload replacing typed role fields.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-role-fields-request.ts"
)]
pub struct UpdateRoleFieldsRequest {
    pub form_id: String,
    pub name: String,
    pub level: i32,
}

/// Incoming payload for a checkbox click on the open form.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/toggle-permission-request.ts"
)]
pub struct TogglePermissionRequest {
    pub form_id: String,
    #[ts(type = "number")]
    pub permission_id: i64,
}

/// API representation of the caller's role form.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-form-response.ts"
)]
pub struct RoleFormResponse {
    pub form_id: String,
    /// `idle`, `open`, `confirming` or `submitting`.
    pub phase: String,
    pub mode: Option<String>,
    #[ts(type = "number | null")]
    pub role_id: Option<i64>,
    pub name: String,
    pub level: i32,
    pub read_only: bool,
    #[ts(type = "Array<number>")]
    pub selected_permission_ids: Vec<i64>,
    pub permission_tree: Vec<PermissionNodeResponse>,
    pub pending_submit_type: Option<String>,
    pub confirmation_message: Option<String>,
    pub opened_at: String,
}

/// Result of a confirmed submission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/submission-outcome-response.ts"
)]
pub struct SubmissionOutcomeResponse {
    pub submit_type: String,
    pub message: String,
    pub role: Option<RoleResponse>,
}
