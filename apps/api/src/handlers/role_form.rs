use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use wisma_core::{AppError, UserIdentity};
use wisma_domain::{RoleFields, RoleFormId, RoleFormMode};

use crate::dto::{
    FormRefRequest, OpenRoleFormRequest, RoleFormResponse, SubmissionOutcomeResponse,
    TogglePermissionRequest, UpdateRoleFieldsRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

fn parse_form_id(value: &str) -> Result<RoleFormId, AppError> {
    value.trim().parse()
}

pub async fn current_form_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Option<RoleFormResponse>>> {
    let session = state.role_admin_service.current_form(&user).await?;

    Ok(Json(session.map(RoleFormResponse::from)))
}

pub async fn open_form_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<OpenRoleFormRequest>,
) -> ApiResult<(StatusCode, Json<RoleFormResponse>)> {
    let mode: RoleFormMode = payload.mode.parse()?;
    let role_id = || {
        payload.role_id.ok_or_else(|| {
            AppError::Validation(format!("role_id is required for {} forms", mode.as_str()))
        })
    };

    let service = &state.role_admin_service;
    let session = match mode {
        RoleFormMode::Create => service.open_create_form(&user).await?,
        RoleFormMode::Update => service.open_update_form(&user, role_id()?).await?,
        RoleFormMode::Detail => service.open_detail_form(&user, role_id()?).await?,
    };

    Ok((StatusCode::CREATED, Json(RoleFormResponse::from(session))))
}

pub async fn close_form_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<FormRefRequest>,
) -> ApiResult<StatusCode> {
    let form_id = parse_form_id(query.form_id.as_str())?;
    state.role_admin_service.close_form(&user, form_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_fields_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<UpdateRoleFieldsRequest>,
) -> ApiResult<Json<RoleFormResponse>> {
    let form_id = parse_form_id(payload.form_id.as_str())?;
    let session = state
        .role_admin_service
        .update_fields(
            &user,
            form_id,
            RoleFields {
                name: payload.name,
                level: payload.level,
            },
        )
        .await?;

    Ok(Json(RoleFormResponse::from(session)))
}

pub async fn toggle_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<TogglePermissionRequest>,
) -> ApiResult<Json<RoleFormResponse>> {
    let form_id = parse_form_id(payload.form_id.as_str())?;
    let session = state
        .role_admin_service
        .toggle_permission(&user, form_id, payload.permission_id)
        .await?;

    Ok(Json(RoleFormResponse::from(session)))
}

pub async fn submit_form_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<FormRefRequest>,
) -> ApiResult<Json<RoleFormResponse>> {
    let form_id = parse_form_id(payload.form_id.as_str())?;
    let session = state
        .role_admin_service
        .request_submit(&user, form_id)
        .await?;

    Ok(Json(RoleFormResponse::from(session)))
}

pub async fn cancel_confirmation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<FormRefRequest>,
) -> ApiResult<Json<Option<RoleFormResponse>>> {
    let form_id = parse_form_id(payload.form_id.as_str())?;
    let session = state
        .role_admin_service
        .cancel_confirmation(&user, form_id)
        .await?;

    Ok(Json(session.map(RoleFormResponse::from)))
}

pub async fn confirm_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<FormRefRequest>,
) -> ApiResult<Json<SubmissionOutcomeResponse>> {
    let form_id = parse_form_id(payload.form_id.as_str())?;
    let outcome = state.role_admin_service.confirm(&user, form_id).await?;

    Ok(Json(SubmissionOutcomeResponse::from(outcome)))
}
