use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use wisma_core::AppError;

use crate::handlers;
use crate::middleware::require_identity;
use crate::state::AppState;

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/api/me", get(handlers::health::me_handler))
        .route(
            "/api/permissions/tree",
            get(handlers::permissions::permission_tree_handler),
        )
        .route(
            "/api/permissions/selection/toggle",
            post(handlers::permissions::toggle_selection_handler),
        )
        .route("/api/roles", get(handlers::roles::list_roles_handler))
        .route(
            "/api/roles/{role_id}/delete-request",
            post(handlers::roles::request_delete_handler),
        )
        .route(
            "/api/roles/form",
            get(handlers::role_form::current_form_handler)
                .post(handlers::role_form::open_form_handler)
                .delete(handlers::role_form::close_form_handler),
        )
        .route(
            "/api/roles/form/fields",
            put(handlers::role_form::update_fields_handler),
        )
        .route(
            "/api/roles/form/toggle",
            post(handlers::role_form::toggle_permission_handler),
        )
        .route(
            "/api/roles/form/submit",
            post(handlers::role_form::submit_form_handler),
        )
        .route(
            "/api/roles/form/cancel",
            post(handlers::role_form::cancel_confirmation_handler),
        )
        .route(
            "/api/roles/form/confirm",
            post(handlers::role_form::confirm_handler),
        )
        .route_layer(from_fn(require_identity));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
