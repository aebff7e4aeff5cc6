use serde::{Deserialize, Serialize};

use wisma_application::{Role, RolePage, RoleSummary};
use wisma_core::AppResult;
use wisma_domain::{PermissionRecord, RoleDraft};

/// `{ "data": ... }` response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct PermissionPayload {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parent: Option<String>,
}

impl PermissionPayload {
    pub(super) fn id(&self) -> i64 {
        self.id
    }

    pub(super) fn into_record(self) -> AppResult<PermissionRecord> {
        PermissionRecord::new(
            self.id,
            self.name,
            self.description.unwrap_or_default(),
            self.parent,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PermissionRefPayload {
    id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RolePayload {
    id: i64,
    name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    permissions: Vec<PermissionRefPayload>,
}

impl From<RolePayload> for Role {
    fn from(value: RolePayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            level: value.level,
            permission_ids: value
                .permissions
                .into_iter()
                .map(|permission| permission.id)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleSummaryPayload {
    id: i64,
    name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    permission_count: Option<usize>,
    #[serde(default)]
    permissions: Vec<PermissionRefPayload>,
}

impl From<RoleSummaryPayload> for RoleSummary {
    fn from(value: RoleSummaryPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            level: value.level,
            permission_count: value
                .permission_count
                .unwrap_or(value.permissions.len()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ListMetaPayload {
    page: u32,
    per_page: u32,
    total: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleListPayload {
    data: Vec<RoleSummaryPayload>,
    #[serde(default)]
    meta: Option<ListMetaPayload>,
}

impl RoleListPayload {
    /// Falls back to the requested paging when the backend omits `meta`.
    pub(super) fn into_page(self, page: u32, per_page: u32) -> RolePage {
        let roles: Vec<RoleSummary> = self.data.into_iter().map(RoleSummary::from).collect();
        match self.meta {
            Some(meta) => RolePage {
                roles,
                page: meta.page,
                per_page: meta.per_page,
                total: meta.total,
            },
            None => RolePage {
                total: roles.len() as u64,
                roles,
                page,
                per_page,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RoleWritePayload<'a> {
    name: &'a str,
    level: i32,
    permission_ids: &'a [i64],
}

impl<'a> From<&'a RoleDraft> for RoleWritePayload<'a> {
    fn from(value: &'a RoleDraft) -> Self {
        Self {
            name: value.name(),
            level: value.level(),
            permission_ids: value.permission_ids(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorPayload {
    pub message: String,
}
