use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use wisma_application::{
    PermissionCatalogRepository, Role, RoleListQuery, RolePage, RoleRepository, RoleSummary,
};
use wisma_core::{AppError, AppResult};
use wisma_domain::{PermissionRecord, RoleDraft};

#[cfg(test)]
mod tests;

/// In-memory stand-in for the upstream backend.
#[derive(Debug, Default)]
pub struct InMemoryRoleBackend {
    permissions: RwLock<Vec<PermissionRecord>>,
    roles: RwLock<BTreeMap<i64, Role>>,
}

impl InMemoryRoleBackend {
    /// Creates a backend holding the given catalog and roles.
    #[must_use]
    pub fn new(permissions: Vec<PermissionRecord>, roles: Vec<Role>) -> Self {
        Self {
            permissions: RwLock::new(permissions),
            roles: RwLock::new(roles.into_iter().map(|role| (role.id, role)).collect()),
        }
    }

    async fn ensure_known_permissions(&self, permission_ids: &[i64]) -> AppResult<()> {
        let permissions = self.permissions.read().await;
        let known: BTreeSet<i64> = permissions.iter().map(PermissionRecord::id).collect();
        let unknown: Vec<String> = permission_ids
            .iter()
            .filter(|id| !known.contains(id))
            .map(i64::to_string)
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "unknown permission ids: {}",
            unknown.join(", ")
        )))
    }
}

fn ensure_unique_name(
    roles: &BTreeMap<i64, Role>,
    name: &str,
    except_role_id: Option<i64>,
) -> AppResult<()> {
    let taken = roles.values().any(|role| {
        Some(role.id) != except_role_id && role.name.eq_ignore_ascii_case(name)
    });

    if taken {
        return Err(AppError::Conflict(format!(
            "role name '{name}' has already been taken"
        )));
    }

    Ok(())
}

fn role_from_draft(role_id: i64, draft: &RoleDraft) -> Role {
    Role {
        id: role_id,
        name: draft.name().to_owned(),
        level: draft.level(),
        permission_ids: draft.permission_ids().to_vec(),
    }
}

#[async_trait]
impl PermissionCatalogRepository for InMemoryRoleBackend {
    async fn fetch_all_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        Ok(self.permissions.read().await.clone())
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleBackend {
    async fn list_roles(&self, query: &RoleListQuery) -> AppResult<RolePage> {
        let roles = self.roles.read().await;
        let search = query.search.as_deref().map(str::to_lowercase);

        let matching: Vec<&Role> = roles
            .values()
            .filter(|role| {
                search
                    .as_deref()
                    .is_none_or(|search| role.name.to_lowercase().contains(search))
            })
            .collect();

        let per_page = query.per_page.max(1);
        let page = query.page.max(1);
        let skip = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);

        Ok(RolePage {
            total: matching.len() as u64,
            roles: matching
                .into_iter()
                .skip(skip)
                .take(per_page as usize)
                .map(|role| RoleSummary {
                    id: role.id,
                    name: role.name.clone(),
                    level: role.level,
                    permission_count: role.permission_ids.len(),
                })
                .collect(),
            page,
            per_page,
        })
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(&role_id).cloned())
    }

    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role> {
        self.ensure_known_permissions(draft.permission_ids()).await?;

        let mut roles = self.roles.write().await;
        ensure_unique_name(&roles, draft.name(), None)?;

        let role_id = roles.keys().next_back().copied().unwrap_or(0) + 1;
        let role = role_from_draft(role_id, draft);
        roles.insert(role_id, role.clone());

        Ok(role)
    }

    async fn update_role(&self, role_id: i64, draft: &RoleDraft) -> AppResult<Role> {
        self.ensure_known_permissions(draft.permission_ids()).await?;

        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role_id) {
            return Err(AppError::NotFound(format!("role {role_id} does not exist")));
        }
        ensure_unique_name(&roles, draft.name(), Some(role_id))?;

        let role = role_from_draft(role_id, draft);
        roles.insert(role_id, role.clone());

        Ok(role)
    }

    async fn delete_role(&self, role_id: i64) -> AppResult<()> {
        self.roles
            .write()
            .await
            .remove(&role_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("role {role_id} does not exist")))
    }
}
