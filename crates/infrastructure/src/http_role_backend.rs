use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;
use wisma_application::{
    PermissionCatalogRepository, Role, RoleListQuery, RolePage, RoleRepository,
};
use wisma_core::{AppError, AppResult};
use wisma_domain::{PermissionRecord, RoleDraft};

mod wire;


use wire::{
    DataEnvelope, ErrorPayload, PermissionPayload, RoleListPayload, RolePayload, RoleWritePayload,
};

/// REST client for the upstream property-management backend.
pub struct HttpRoleBackend {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
    catalog_page_size: u32,
}

impl HttpRoleBackend {
    /// Creates a backend client rooted at `base_url`.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        api_token: Option<String>,
        catalog_page_size: u32,
    ) -> Self {
        Self {
            http_client,
            base_url,
            api_token: api_token.filter(|token| !token.trim().is_empty()),
            catalog_page_size: catalog_page_size.max(1),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "backend base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(|error| {
            AppError::Internal(format!("backend request failed: {error}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "backend rejected request");
        Err(error_from_status(status, body.as_str()))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        self.execute(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|error| {
                AppError::Internal(format!("backend returned malformed JSON: {error}"))
            })
    }
}

/// Maps an upstream error status and body onto an application error.
///
/// A JSON `{ "message": ... }` body becomes the error text; otherwise the raw
/// body, or the status reason when the body is empty.
fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorPayload>(body)
        .map(|payload| payload.message)
        .ok()
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("backend request failed")
                .to_owned()
        });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}

#[async_trait]
impl PermissionCatalogRepository for HttpRoleBackend {
    async fn fetch_all_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        let mut url = self.endpoint(&["permissions"])?;
        url.query_pairs_mut()
            .append_pair("per_page", self.catalog_page_size.to_string().as_str());

        let envelope: DataEnvelope<Vec<PermissionPayload>> =
            self.fetch_json(self.request(Method::GET, url)).await?;

        let records = envelope
            .data
            .into_iter()
            .filter_map(|payload| {
                let permission_id = payload.id();
                payload
                    .into_record()
                    .inspect_err(|error| {
                        tracing::warn!(
                            permission_id,
                            error = %error,
                            "invalid permission catalog row skipped"
                        );
                    })
                    .ok()
            })
            .collect();

        Ok(records)
    }
}

#[async_trait]
impl RoleRepository for HttpRoleBackend {
    async fn list_roles(&self, query: &RoleListQuery) -> AppResult<RolePage> {
        let mut url = self.endpoint(&["roles"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = &query.search {
                pairs.append_pair("search", search.as_str());
            }
            pairs
                .append_pair("page", query.page.to_string().as_str())
                .append_pair("per_page", query.per_page.to_string().as_str());
        }

        let payload: RoleListPayload = self.fetch_json(self.request(Method::GET, url)).await?;
        Ok(payload.into_page(query.page, query.per_page))
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        let url = self.endpoint(&["roles", role_id.to_string().as_str()])?;

        match self
            .fetch_json::<DataEnvelope<RolePayload>>(self.request(Method::GET, url))
            .await
        {
            Ok(envelope) => Ok(Some(Role::from(envelope.data))),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role> {
        let url = self.endpoint(&["roles"])?;
        let builder = self
            .request(Method::POST, url)
            .json(&RoleWritePayload::from(draft));

        let envelope: DataEnvelope<RolePayload> = self.fetch_json(builder).await?;
        Ok(Role::from(envelope.data))
    }

    async fn update_role(&self, role_id: i64, draft: &RoleDraft) -> AppResult<Role> {
        let url = self.endpoint(&["roles", role_id.to_string().as_str()])?;
        let builder = self
            .request(Method::PUT, url)
            .json(&RoleWritePayload::from(draft));

        let envelope: DataEnvelope<RolePayload> = self.fetch_json(builder).await?;
        Ok(Role::from(envelope.data))
    }

    async fn delete_role(&self, role_id: i64) -> AppResult<()> {
        let url = self.endpoint(&["roles", role_id.to_string().as_str()])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
