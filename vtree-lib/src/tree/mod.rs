//! Expansion tree.
//!
//! A sparse record of which items are currently expanded. Only open
//! branches are stored; every other row of the virtual list is implied by
//! the declared child counts. The tree owns its nodes by value and is only
//! ever addressed by item id, so mutations never invalidate a handle.
//!
//! # Example
//!
//! ```
//! use vtree_lib::tree::ExpansionTree;
//!
//! let mut tree = ExpansionTree::new(3);
//! tree.expand("a", None, 1, 2).unwrap();
//! tree.index();
//!
//! assert!(tree.is_expanded("a"));
//! assert_eq!(tree.total_rows(), 5);
//! ```

mod index;

pub use index::Layout;

use crate::error::TreeError;

/// Opaque identifier of a tree item, as supplied by the data provider.
pub type ItemId = String;

/// A currently expanded item and the expansions nested beneath it.
#[derive(Debug, Clone)]
pub struct ExpansionNode {
    /// Item id, `None` for the synthetic root.
    id: Option<ItemId>,
    /// Position among the parent's declared children.
    offset: usize,
    /// Declared number of direct children.
    children: usize,
    /// Expanded descendants, kept sorted by offset before every pass.
    expansions: Vec<ExpansionNode>,
    /// Derived by the index pass; cleared whenever the tree changes.
    layout: Option<Layout>,
}

impl ExpansionNode {
    fn new(id: Option<ItemId>, offset: usize, children: usize) -> Self {
        Self {
            id,
            offset,
            children,
            expansions: Vec::new(),
            layout: None,
        }
    }

    /// Returns the item id, `None` for the root.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the position of this item among its parent's children.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the declared number of direct children.
    pub fn children(&self) -> usize {
        self.children
    }

    /// Returns the expanded descendants directly beneath this node.
    pub fn expansions(&self) -> &[ExpansionNode] {
        &self.expansions
    }

    /// Returns the layout computed by the most recent index pass.
    ///
    /// `None` if the tree changed since the last [`ExpansionTree::index`].
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    fn matches(&self, id: Option<&str>) -> bool {
        self.id.as_deref() == id
    }

    fn find(&self, id: Option<&str>) -> Option<&ExpansionNode> {
        if self.matches(id) {
            return Some(self);
        }
        self.expansions.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: Option<&str>) -> Option<&mut ExpansionNode> {
        if self.matches(id) {
            return Some(self);
        }
        self.expansions
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    fn depth_of(&self, id: Option<&str>, depth: usize) -> Option<usize> {
        if self.matches(id) {
            return Some(depth);
        }
        self.expansions
            .iter()
            .find_map(|child| child.depth_of(id, depth + 1))
    }

    fn sort(&mut self) {
        // Stable: siblings sharing an offset keep insertion order.
        self.expansions.sort_by_key(|child| child.offset);
        for child in &mut self.expansions {
            child.sort();
        }
    }

    fn clear_layout(&mut self) {
        self.layout = None;
        for child in &mut self.expansions {
            child.clear_layout();
        }
    }
}

/// Equality is structural; the derived layout is not compared.
impl PartialEq for ExpansionNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.offset == other.offset
            && self.children == other.children
            && self.expansions == other.expansions
    }
}

impl Eq for ExpansionNode {}

/// The expansion tree of one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionTree {
    root: ExpansionNode,
}

impl ExpansionTree {
    /// Creates a tree with nothing expanded and `total_root_items` top-level items.
    pub fn new(total_root_items: usize) -> Self {
        Self {
            root: ExpansionNode::new(None, 0, total_root_items),
        }
    }

    /// Returns the synthetic root.
    pub fn root(&self) -> &ExpansionNode {
        &self.root
    }

    /// Updates the number of top-level items.
    pub fn set_root_children(&mut self, total_root_items: usize) {
        if self.root.children != total_root_items {
            self.root.children = total_root_items;
            self.root.clear_layout();
        }
    }

    /// Finds an expansion by id, `None` addressing the root.
    pub fn find(&self, id: Option<&str>) -> Option<&ExpansionNode> {
        self.root.find(id)
    }

    /// Returns `true` if the item is currently expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.find(Some(id)).is_some()
    }

    /// Returns `true` if the item is expanded directly beneath `parent`.
    pub fn is_expanded_under(&self, id: &str, parent: Option<&str>) -> bool {
        self.find(parent)
            .is_some_and(|node| node.expansions.iter().any(|child| child.matches(Some(id))))
    }

    /// Returns the nesting depth of an expansion (root = 0).
    ///
    /// Rows fetched as children of `parent` are indented by this level.
    pub fn level_of(&self, parent: Option<&str>) -> Option<usize> {
        self.root.depth_of(parent, 0)
    }

    /// Records `id` as expanded under `parent`.
    ///
    /// `offset` is the item's absolute position among the parent's children,
    /// taken from the fetched row. Returns `Ok(false)` if the item is already
    /// expanded under that parent.
    pub fn expand(
        &mut self,
        id: &str,
        parent: Option<&str>,
        offset: usize,
        children: usize,
    ) -> Result<bool, TreeError> {
        let node = self
            .root
            .find_mut(parent)
            .ok_or_else(|| TreeError::parent_not_expanded(parent))?;

        if node.expansions.iter().any(|child| child.matches(Some(id))) {
            return Ok(false);
        }

        node.expansions
            .push(ExpansionNode::new(Some(id.to_string()), offset, children));
        self.root.clear_layout();
        log::debug!("[tree] expanded {} under {:?} at offset {}", id, parent, offset);
        Ok(true)
    }

    /// Removes `id` (and every expansion nested beneath it) from `parent`.
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn collapse(&mut self, id: &str, parent: Option<&str>) -> bool {
        let Some(node) = self.root.find_mut(parent) else {
            return false;
        };
        let Some(index) = node
            .expansions
            .iter()
            .position(|child| child.matches(Some(id)))
        else {
            return false;
        };

        let removed = node.expansions.remove(index);
        self.root.clear_layout();
        log::debug!(
            "[tree] collapsed {} under {:?} ({} nested expansions dropped)",
            id,
            parent,
            removed.iter().count()
        );
        true
    }

    /// Sorts every expansion list by offset.
    pub fn sort(&mut self) {
        self.root.sort();
    }

    /// Iterates over every non-root expansion in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &ExpansionNode> {
        self.root.iter()
    }
}

impl ExpansionNode {
    /// Iterates over every expansion nested beneath this node in pre-order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.expansions.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over nested expansions.
pub struct Iter<'a> {
    stack: Vec<&'a ExpansionNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ExpansionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.expansions.iter().rev());
        Some(node)
    }
}
