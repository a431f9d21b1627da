//! Virtual row index calculation.
//!
//! Stamps every expansion with the inclusive range of virtual rows its
//! children occupy, counting the rows of nested expansions once.
//!
//! ```text
//! row  item          expansion layout
//!  0   Item 1
//!  1   Item 2        start 2, end 8
//!  2     Item 2.1    start 3, end 3
//!  3       Item 2.1.1
//!  4     Item 2.2
//!  5     Item 2.3    start 6, end 6
//!  6       Item 2.3.1
//!  7     Item 2.4    start 8, end 8
//!  8       Item 2.4.1
//!  9   Item 3
//! 10   Item 4        start 11, end 12
//! 11     Item 4.1
//! 12     Item 4.2
//! ```

use super::{ExpansionNode, ExpansionTree};

/// Position of an expansion in the flattened virtual row space.
///
/// `start` is the virtual index of the first child row; `end` is the last
/// row contributed by the expansion or any expansion nested in it. An
/// expansion with no rows has `end == start - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Nesting depth, root = 0.
    pub level: usize,
    /// First virtual row.
    pub start: i64,
    /// Last virtual row (inclusive).
    pub end: i64,
}

impl Layout {
    /// Number of rows covered, `end - start + 1`.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    /// Returns `true` if the expansion covers no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ExpansionTree {
    /// Sorts the tree and recomputes the layout of every expansion.
    ///
    /// Must run after every mutation and before every query build; layouts
    /// are never carried over from a previous pass.
    pub fn index(&mut self) {
        self.sort();

        let root = &mut self.root;
        stamp(&mut root.expansions, 0, 1);
        let end = root.children as i64 + nested_rows(&root.expansions) - 1;
        root.layout = Some(Layout {
            level: 0,
            start: 0,
            end,
        });
    }

    /// Total number of virtual rows, as of the last [`index`](Self::index).
    ///
    /// Returns 0 if the tree has not been indexed since it last changed.
    pub fn total_rows(&self) -> usize {
        self.root.layout.map(|layout| layout.len()).unwrap_or(0)
    }
}

/// Stamps siblings left to right; `parent_start` is the parent's first child row.
fn stamp(expansions: &mut [ExpansionNode], parent_start: i64, level: usize) {
    let mut previous: Option<(i64, usize)> = None;

    for node in expansions.iter_mut() {
        // Skip the collapsed rows between the previous anchor and this item,
        // then step past the item's own row.
        let start = match previous {
            Some((prev_end, prev_offset)) => {
                prev_end + 1 + (node.offset as i64 - prev_offset as i64)
            }
            None => parent_start + 1 + node.offset as i64,
        };

        stamp(&mut node.expansions, start, level + 1);

        let end = start + node.children as i64 + nested_rows(&node.expansions) - 1;
        node.layout = Some(Layout { level, start, end });
        previous = Some((end, node.offset));
    }
}

fn nested_rows(expansions: &[ExpansionNode]) -> i64 {
    expansions
        .iter()
        .filter_map(|child| child.layout)
        .map(|layout| layout.len() as i64)
        .sum()
}
