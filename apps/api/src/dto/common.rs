use serde::Serialize;
use ts_rs::TS;
use wisma_core::UserIdentity;
use wisma_domain::AdminPermission;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the signed-in user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub subject: String,
    pub display_name: String,
    /// Role administration actions the user may trigger.
    pub role_permissions: Vec<String>,
}

impl From<&UserIdentity> for UserIdentityResponse {
    fn from(value: &UserIdentity) -> Self {
        Self {
            subject: value.subject().to_owned(),
            display_name: value.display_name().to_owned(),
            role_permissions: AdminPermission::granted_to(value)
                .into_iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
        }
    }
}
