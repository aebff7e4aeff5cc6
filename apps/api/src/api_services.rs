use std::sync::Arc;

use wisma_application::{PermissionCatalogRepository, RoleAdminService, RoleRepository};
use wisma_core::AppError;
use wisma_infrastructure::{HttpRoleBackend, InMemoryRoleFormSessionStore};

use crate::api_config::{ApiConfig, BackendConfig};
use crate::dev_seed;
use crate::state::AppState;

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let (catalog, roles): (Arc<dyn PermissionCatalogRepository>, Arc<dyn RoleRepository>) =
        match &config.backend {
            BackendConfig::Http {
                base_url,
                api_token,
                timeout,
                catalog_page_size,
            } => {
                let http_client = reqwest::Client::builder()
                    .timeout(*timeout)
                    .build()
                    .map_err(|error| {
                        AppError::Internal(format!("failed to build backend HTTP client: {error}"))
                    })?;
                let backend = Arc::new(HttpRoleBackend::new(
                    http_client,
                    base_url.clone(),
                    api_token.clone(),
                    *catalog_page_size,
                ));
                tracing::info!(base_url = %base_url, "using HTTP role backend");
                let catalog: Arc<dyn PermissionCatalogRepository> = backend.clone();
                let roles: Arc<dyn RoleRepository> = backend;
                (catalog, roles)
            }
            BackendConfig::Memory => {
                let backend = Arc::new(dev_seed::seeded_backend()?);
                tracing::info!("using in-memory role backend with seed data");
                let catalog: Arc<dyn PermissionCatalogRepository> = backend.clone();
                let roles: Arc<dyn RoleRepository> = backend;
                (catalog, roles)
            }
        };

    Ok(AppState {
        role_admin_service: RoleAdminService::new(
            catalog,
            roles,
            Arc::new(InMemoryRoleFormSessionStore::new()),
        ),
    })
}
