//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
mod role;
mod role_form;
mod security;
mod selection;

pub use permission::{PermissionNode, PermissionRecord, PermissionTree};
pub use role::{RoleDraft, RoleFields};
pub use role_form::{
    PendingSubmission, RoleForm, RoleFormId, RoleFormMode, RoleFormPhase, RoleFormState,
    SubmitType,
};
pub use security::AdminPermission;
pub use selection::{PermissionSelection, toggle_selection};
