mod conversions;
mod types;

pub use types::{
    FormRefRequest, OpenRoleFormRequest, RoleFormResponse, SubmissionOutcomeResponse,
    TogglePermissionRequest, UpdateRoleFieldsRequest,
};
