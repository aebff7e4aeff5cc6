use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wisma_application::{Role, RoleListQuery, RolePage, RoleSummary};

/// Query string for role listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-list-query.ts"
)]
pub struct RoleListQueryParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// API representation of a stored role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub level: i32,
    #[ts(type = "Array<number>")]
    pub permission_ids: Vec<i64>,
}

/// Role row in the listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-summary-response.ts"
)]
pub struct RoleSummaryResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub permission_count: usize,
}

/// One page of the role listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-page-response.ts"
)]
pub struct RolePageResponse {
    pub roles: Vec<RoleSummaryResponse>,
    pub page: u32,
    pub per_page: u32,
    #[ts(type = "number")]
    pub total: u64,
}

impl From<RoleListQueryParams> for RoleListQuery {
    fn from(value: RoleListQueryParams) -> Self {
        let defaults = Self::default();
        Self {
            search: value.search,
            page: value.page.unwrap_or(defaults.page),
            per_page: value.per_page.unwrap_or(defaults.per_page),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id,
            name: value.name,
            level: value.level,
            permission_ids: value.permission_ids,
        }
    }
}

impl From<RoleSummary> for RoleSummaryResponse {
    fn from(value: RoleSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            level: value.level,
            permission_count: value.permission_count,
        }
    }
}

impl From<RolePage> for RolePageResponse {
    fn from(value: RolePage) -> Self {
        Self {
            roles: value
                .roles
                .into_iter()
                .map(RoleSummaryResponse::from)
                .collect(),
            page: value.page,
            per_page: value.per_page,
            total: value.total,
        }
    }
}
