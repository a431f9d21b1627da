//! Page type for merged windowing results.

use serde::Serialize;

use super::Viewport;
use crate::provider::Row;

/// A row placed in the rendered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    /// The row as supplied by the provider.
    pub row: Row,
    /// Absolute position among its parent's children.
    pub offset: usize,
    /// Nesting level used for indentation (top-level rows = 0).
    pub indent: usize,
    /// Whether the row is currently expanded.
    pub expanded: bool,
}

impl RenderedRow {
    /// Returns the item id.
    pub fn id(&self) -> &str {
        &self.row.id
    }

    /// Returns the parent id, `None` for top-level rows.
    pub fn parent(&self) -> Option<&str> {
        self.row.parent.as_deref()
    }

    /// Returns the declared child count (0 for leaves).
    pub fn children(&self) -> usize {
        self.row.children.unwrap_or(0)
    }

    /// Left padding in pixels.
    pub fn indent_px(&self, indent_width: u32) -> u32 {
        self.indent as u32 * indent_width
    }
}

/// The result of one windowing pass.
///
/// Holds the visible rows top to bottom along with the geometry needed to
/// size the scrollbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    generation: u64,
    viewport: Viewport,
    rows: Vec<RenderedRow>,
    /// Total virtual rows given the expansion state of this pass.
    total_rows: usize,
}

impl Page {
    /// Creates a new page.
    pub fn new(generation: u64, viewport: Viewport, rows: Vec<RenderedRow>, total_rows: usize) -> Self {
        Self {
            generation,
            viewport,
            rows,
            total_rows,
        }
    }

    /// Returns the generation this page was built for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the viewport this page covers.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the rows, top to bottom.
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<RenderedRow> {
        self.rows
    }

    /// Returns the total number of virtual rows.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Scrollable content height in pixels.
    pub fn content_height(&self, row_height: u32) -> u64 {
        self.total_rows as u64 * row_height as u64
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if fewer rows than the viewport holds were available.
    pub fn is_short(&self) -> bool {
        self.rows.len() < self.viewport.rows
    }

    /// Iterates over the row ids, top to bottom.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(RenderedRow::id)
    }
}
