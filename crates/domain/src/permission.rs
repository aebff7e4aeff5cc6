use std::collections::HashMap;

use serde::Serialize;
use wisma_core::{AppResult, NonEmptyString};

/// Flat permission catalog row as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    id: i64,
    name: NonEmptyString,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
}

impl PermissionRecord {
    /// Creates a validated permission record.
    ///
    /// A blank `parent` is treated as absent, making the record a root.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        parent: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into().trim().to_owned(),
            parent: parent.and_then(|value| {
                let trimmed = value.trim().to_owned();
                (!trimmed.is_empty()).then_some(trimmed)
            }),
        })
    }

    /// Returns the permission id.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the unique name other records reference as their parent.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the parent name, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// One node of the permission hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionNode {
    id: i64,
    name: String,
    description: String,
    children: Vec<PermissionNode>,
}

impl PermissionNode {
    /// Returns the permission id.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns direct children in catalog order.
    #[must_use]
    pub fn children(&self) -> &[PermissionNode] {
        &self.children
    }

    /// Returns every id below this node, parents before their children.
    #[must_use]
    pub fn descendant_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        let mut pending: Vec<&PermissionNode> = self.children.iter().rev().collect();

        while let Some(node) = pending.pop() {
            ids.push(node.id);
            pending.extend(node.children.iter().rev());
        }

        ids
    }

    fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PermissionNode::depth)
            .max()
            .unwrap_or(0)
    }

    fn find(&self, id: i64) -> Option<&PermissionNode> {
        if self.id == id {
            return Some(self);
        }

        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Permission hierarchy rebuilt from one catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PermissionTree {
    roots: Vec<PermissionNode>,
    #[serde(skip)]
    unresolved: Vec<PermissionRecord>,
}

impl PermissionTree {
    /// Builds the hierarchy from a flat catalog without touching the input.
    ///
    /// Records without a parent become roots in catalog order. Records are
    /// attached under the first record carrying their parent name. Records
    /// whose parent chain never reaches a root (dangling names, cycles) are
    /// left out of the tree and reported by [`PermissionTree::unresolved`].
    #[must_use]
    pub fn build(records: &[PermissionRecord]) -> Self {
        let mut index_by_name: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            index_by_name.entry(record.name()).or_insert(index);
        }

        let mut child_indexes: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
        let mut root_indexes = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match record.parent() {
                None => root_indexes.push(index),
                Some(parent) => {
                    if let Some(&parent_index) = index_by_name.get(parent) {
                        child_indexes[parent_index].push(index);
                    }
                }
            }
        }

        let mut attached = vec![false; records.len()];
        let roots = root_indexes
            .into_iter()
            .map(|index| assemble(records, &child_indexes, index, &mut attached))
            .collect();

        let unresolved = records
            .iter()
            .zip(attached)
            .filter(|(_, is_attached)| !is_attached)
            .map(|(record, _)| record.clone())
            .collect();

        Self { roots, unresolved }
    }

    /// Returns top-level nodes in catalog order.
    #[must_use]
    pub fn roots(&self) -> &[PermissionNode] {
        &self.roots
    }

    /// Returns catalog records that could not be placed in the tree.
    #[must_use]
    pub fn unresolved(&self) -> &[PermissionRecord] {
        &self.unresolved
    }

    /// Finds a node anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&PermissionNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Returns every id below the node with `id`, or `None` when it is not placed.
    #[must_use]
    pub fn descendant_ids(&self, id: i64) -> Option<Vec<i64>> {
        self.find(id).map(PermissionNode::descendant_ids)
    }

    /// Returns whether the id is placed in the tree.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// Returns the number of placed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots
            .iter()
            .map(|root| 1 + root.descendant_ids().len())
            .sum()
    }

    /// Returns whether no node was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the number of levels, zero for an empty tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(PermissionNode::depth)
            .max()
            .unwrap_or(0)
    }
}

fn assemble(
    records: &[PermissionRecord],
    child_indexes: &[Vec<usize>],
    index: usize,
    attached: &mut [bool],
) -> PermissionNode {
    attached[index] = true;
    let record = &records[index];

    PermissionNode {
        id: record.id(),
        name: record.name().to_owned(),
        description: record.description().to_owned(),
        children: child_indexes[index]
            .iter()
            .map(|&child_index| assemble(records, child_indexes, child_index, attached))
            .collect(),
    }
}
