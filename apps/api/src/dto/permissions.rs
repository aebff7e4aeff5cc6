use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wisma_domain::{PermissionNode, PermissionTree};

/// One node of the permission hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-node-response.ts"
)]
pub struct PermissionNodeResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub children: Vec<PermissionNodeResponse>,
}

/// Permission hierarchy for the role form.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-tree-response.ts"
)]
pub struct PermissionTreeResponse {
    pub roots: Vec<PermissionNodeResponse>,
    /// Catalog records left out because their parent never resolves.
    pub unresolved_count: usize,
}

/// Incoming payload for a stateless checkbox click.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/toggle-selection-request.ts"
)]
pub struct ToggleSelectionRequest {
    #[ts(type = "Array<number>")]
    pub selected: Vec<i64>,
    #[ts(type = "number")]
    pub permission_id: i64,
}

/// Selection after a click.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/selection-response.ts"
)]
pub struct SelectionResponse {
    #[ts(type = "Array<number>")]
    pub selected: Vec<i64>,
}

impl From<&PermissionNode> for PermissionNodeResponse {
    fn from(value: &PermissionNode) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            children: value.children().iter().map(Self::from).collect(),
        }
    }
}

impl From<&PermissionTree> for PermissionTreeResponse {
    fn from(value: &PermissionTree) -> Self {
        Self {
            roots: value
                .roots()
                .iter()
                .map(PermissionNodeResponse::from)
                .collect(),
            unresolved_count: value.unresolved().len(),
        }
    }
}
