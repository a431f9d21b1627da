//! Query synthesis.
//!
//! Walks the indexed expansion tree and emits the smallest set of
//! `{parent, offset, limit}` slices that together cover the viewport.
//! Rows covered by a nested expansion are subtracted from the enclosing
//! query so nothing is requested twice.

use serde::Deserialize;
use serde::Serialize;

use super::Viewport;
use crate::tree::{ExpansionNode, ExpansionTree, ItemId};

/// A request for a contiguous slice of one parent's children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Parent whose children are requested, `None` for top-level items.
    pub parent: Option<ItemId>,
    /// Index of the first requested child.
    pub offset: usize,
    /// Maximum number of children to return.
    pub limit: usize,
}

impl Query {
    /// Creates a new query.
    pub fn new(parent: Option<&str>, offset: usize, limit: usize) -> Self {
        Self {
            parent: parent.map(str::to_string),
            offset,
            limit,
        }
    }
}

/// A query still being adjusted by its nested expansions.
struct Draft {
    parent: Option<ItemId>,
    offset: i64,
    limit: i64,
}

/// Builds the queries covering `viewport`.
///
/// Re-indexes the tree first, so the result always reflects its current
/// shape. Queries are returned in pre-order: every query precedes the
/// queries of expansions nested inside it.
pub fn build_queries(tree: &mut ExpansionTree, viewport: Viewport) -> Vec<Query> {
    tree.index();

    let mut drafts = Vec::new();
    walk(std::slice::from_ref(tree.root()), None, viewport, &mut drafts);

    drafts
        .into_iter()
        .map(|draft| {
            debug_assert!(draft.offset >= 0 && draft.limit >= 0);
            let query = Query {
                parent: draft.parent,
                offset: draft.offset.max(0) as usize,
                limit: draft.limit.max(0) as usize,
            };
            log::trace!("[window] {:?}", query);
            query
        })
        .collect()
}

fn walk(
    nodes: &[ExpansionNode],
    parent: Option<usize>,
    viewport: Viewport,
    drafts: &mut Vec<Draft>,
) {
    let Some(last) = viewport.last() else {
        return;
    };
    let scroll = viewport.scroll as i64;
    let last = last as i64;
    let rows = viewport.rows as i64;

    for node in nodes {
        let Some(layout) = node.layout() else {
            continue;
        };

        if viewport.intersects(layout.start, layout.end) {
            let first_visible = scroll.max(layout.start);
            let last_visible = last.min(layout.end);
            let visible = (last_visible - first_visible + 1).min(rows).max(0);

            if let Some(parent) = parent {
                let draft = &mut drafts[parent];
                // These rows come from this expansion's own query.
                draft.limit -= visible;
                // Rows of this expansion above the viewport are not part of
                // the parent's own children and must not be skipped over.
                if scroll > layout.start {
                    draft.offset -= scroll - layout.start;
                }
            }

            drafts.push(Draft {
                parent: node.id().map(str::to_string),
                offset: (scroll - layout.start).max(0),
                limit: visible.min(rows),
            });
            let index = drafts.len() - 1;
            walk(node.expansions(), Some(index), viewport, drafts);
        } else if scroll > layout.end {
            if let Some(parent) = parent {
                drafts[parent].offset -= layout.len() as i64;
            }
        }
        // Expansions below the viewport cannot shift anything visible.
    }
}
