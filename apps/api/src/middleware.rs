use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use wisma_core::{AppError, UserIdentity};

use crate::error::ApiResult;

pub const SUBJECT_HEADER: &str = "x-wisma-subject";
pub const DISPLAY_NAME_HEADER: &str = "x-wisma-display-name";
pub const PERMISSIONS_HEADER: &str = "x-wisma-permissions";

/// Builds the caller identity from headers set by the auth gateway.
pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap) -> ApiResult<UserIdentity> {
    let subject = header_value(headers, SUBJECT_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let display_name = header_value(headers, DISPLAY_NAME_HEADER).unwrap_or(subject);
    let permissions = header_value(headers, PERMISSIONS_HEADER)
        .map(|value| value.split(',').collect::<Vec<_>>())
        .unwrap_or_default();

    Ok(UserIdentity::new(subject, display_name, permissions))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
