use async_trait::async_trait;

use wisma_core::AppResult;
use wisma_domain::{PermissionSelection, RoleDraft};

/// Role as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Backend role identifier.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Access level.
    pub level: i32,
    /// Granted permission ids.
    pub permission_ids: Vec<i64>,
}

impl Role {
    /// Returns granted permissions as a form selection.
    #[must_use]
    pub fn selection(&self) -> PermissionSelection {
        self.permission_ids.iter().copied().collect()
    }
}

/// Role row shown in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    /// Backend role identifier.
    pub id: i64,
    /// Role name.
    pub name: String,
    /// Access level.
    pub level: i32,
    /// Number of granted permissions.
    pub permission_count: usize,
}

/// Query parameters for role listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleListQuery {
    /// Optional case-insensitive name filter.
    pub search: Option<String>,
    /// One-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
}

impl RoleListQuery {
    /// Largest page size forwarded to the backend.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Returns the query with a blank search dropped and paging clamped.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            search: self
                .search
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }
}

impl Default for RoleListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            per_page: 10,
        }
    }
}

/// One page of the role listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePage {
    /// Rows on this page.
    pub roles: Vec<RoleSummary>,
    /// One-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Total rows matching the query.
    pub total: u64,
}

/// Repository port for backend role storage.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists roles matching the query.
    async fn list_roles(&self, query: &RoleListQuery) -> AppResult<RolePage>;

    /// Finds one role with its granted permissions.
    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>>;

    /// Creates a role from a validated draft.
    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role>;

    /// Replaces a stored role with a validated draft.
    async fn update_role(&self, role_id: i64, draft: &RoleDraft) -> AppResult<Role>;

    /// Deletes a stored role.
    async fn delete_role(&self, role_id: i64) -> AppResult<()>;
}
