//! Expansion tree errors

use crate::tree::ItemId;

/// Errors raised while mutating the expansion tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The parent named by an expand request is not currently expanded.
    #[error("parent {} is not expanded", display_parent(.parent))]
    ParentNotExpanded {
        /// The parent id, `None` for the root.
        parent: Option<ItemId>,
    },
}

impl TreeError {
    /// Creates a new parent-not-expanded error.
    pub fn parent_not_expanded(parent: Option<&str>) -> Self {
        Self::ParentNotExpanded {
            parent: parent.map(str::to_string),
        }
    }
}

pub(crate) fn display_parent(parent: &Option<ItemId>) -> String {
    match parent {
        Some(id) => format!("'{}'", id),
        None => "<root>".to_string(),
    }
}
