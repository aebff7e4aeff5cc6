use wisma_application::RoleAdminService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_admin_service: RoleAdminService,
}
