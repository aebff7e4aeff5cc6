mod common;
mod permissions;
mod role_form;
mod roles;

pub use common::{HealthResponse, UserIdentityResponse};
pub use permissions::{
    PermissionNodeResponse, PermissionTreeResponse, SelectionResponse, ToggleSelectionRequest,
};
pub use role_form::{
    FormRefRequest, OpenRoleFormRequest, RoleFormResponse, SubmissionOutcomeResponse,
    TogglePermissionRequest, UpdateRoleFieldsRequest,
};
pub use roles::{
    RoleListQueryParams, RolePageResponse, RoleResponse, RoleSummaryResponse,
};
