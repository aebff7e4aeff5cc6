use async_trait::async_trait;

use wisma_core::AppResult;
use wisma_domain::PermissionRecord;

/// Repository port for the flat permission catalog.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Fetches every permission record in backend order.
    async fn fetch_all_permissions(&self) -> AppResult<Vec<PermissionRecord>>;
}
