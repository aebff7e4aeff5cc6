use axum::Json;
use axum::extract::Extension;
use wisma_core::UserIdentity;

use crate::dto::{HealthResponse, UserIdentityResponse};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn me_handler(Extension(user): Extension<UserIdentity>) -> Json<UserIdentityResponse> {
    Json(UserIdentityResponse::from(&user))
}
