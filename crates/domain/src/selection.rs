use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PermissionNode;

/// Permission ids currently ticked in a role form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSelection(BTreeSet<i64>);

impl PermissionSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the id is selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Returns the number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Returns selected ids as an ascending vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i64> {
        self.ids().collect()
    }

    /// Returns the selection after a click on `node`.
    ///
    /// A selected node is removed together with all of its descendants; an
    /// unselected node is added together with all of its descendants.
    /// Ancestors and siblings keep their state.
    #[must_use]
    pub fn toggled(&self, node: &PermissionNode) -> Self {
        let mut next = self.0.clone();
        let descendant_ids = node.descendant_ids();

        if next.contains(&node.id()) {
            next.remove(&node.id());
            for id in descendant_ids {
                next.remove(&id);
            }
        } else {
            next.insert(node.id());
            next.extend(descendant_ids);
        }

        Self(next)
    }
}

impl FromIterator<i64> for PermissionSelection {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns `selected` after a click on `node`.
#[must_use]
pub fn toggle_selection(
    selected: &PermissionSelection,
    node: &PermissionNode,
) -> PermissionSelection {
    selected.toggled(node)
}
