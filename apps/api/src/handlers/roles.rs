use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use wisma_core::UserIdentity;

use crate::dto::{RoleFormResponse, RoleListQueryParams, RolePageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<RoleListQueryParams>,
) -> ApiResult<Json<RolePageResponse>> {
    let page = state
        .role_admin_service
        .list_roles(&user, query.into())
        .await?;

    Ok(Json(RolePageResponse::from(page)))
}

pub async fn request_delete_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RoleFormResponse>> {
    let session = state
        .role_admin_service
        .request_delete(&user, role_id)
        .await?;

    Ok(Json(RoleFormResponse::from(session)))
}
