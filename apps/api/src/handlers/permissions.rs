use axum::Json;
use axum::extract::{Extension, State};
use wisma_core::UserIdentity;
use wisma_domain::PermissionSelection;

use crate::dto::{PermissionTreeResponse, SelectionResponse, ToggleSelectionRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn permission_tree_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<PermissionTreeResponse>> {
    let tree = state.role_admin_service.permission_tree(&user).await?;

    Ok(Json(PermissionTreeResponse::from(&tree)))
}

pub async fn toggle_selection_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<ToggleSelectionRequest>,
) -> ApiResult<Json<SelectionResponse>> {
    let selected: PermissionSelection = payload.selected.into_iter().collect();
    let selection = state
        .role_admin_service
        .toggle_selection(&user, &selected, payload.permission_id)
        .await?;

    Ok(Json(SelectionResponse {
        selected: selection.to_vec(),
    }))
}
