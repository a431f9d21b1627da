//! Main VirtualTree engine

use crate::config::EngineConfig;
use crate::error::Error;
use crate::provider::{Batch, DataProvider};
use crate::tree::ExpansionTree;
use crate::window::{Page, Query, RenderedRow, Viewport, build_queries, merge_batches};

/// Windowing engine for one lazily loaded tree.
///
/// Owns the expansion tree, the current viewport and a generation counter.
/// Every viewport change or expand/collapse bumps the generation, so a
/// response built for an earlier state is discarded instead of merged.
///
/// # Example
///
/// ```no_run
/// use vtree_lib::provider::InMemoryProvider;
/// use vtree_lib::{Viewport, VirtualTree};
///
/// async fn show_first_page() -> Result<(), vtree_lib::error::Error> {
///     let provider = InMemoryProvider::generate(1_000, 10, 3);
///     let mut tree = VirtualTree::new(provider, 1_000);
///     tree.set_viewport(Viewport::new(0, 20));
///
///     if let Some(page) = tree.refresh().await? {
///         for row in page.rows() {
///             println!("{}{}", "  ".repeat(row.indent), row.row.label);
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct VirtualTree<P> {
    provider: P,
    config: EngineConfig,
    tree: ExpansionTree,
    viewport: Viewport,
    generation: u64,
    total_rows: usize,
    page: Page,
}

/// The queries of one windowing pass, tagged with the generation they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Generation the queries were built for.
    pub generation: u64,
    /// Viewport the queries cover.
    pub viewport: Viewport,
    /// Queries in pre-order, to be answered one batch each.
    pub queries: Vec<Query>,
    /// Total virtual rows at the time of the pass.
    pub total_rows: usize,
}

/// Outcome of [`VirtualTree::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The item is now expanded.
    Expanded,
    /// The item is now collapsed.
    Collapsed,
}

impl<P: DataProvider> VirtualTree<P> {
    /// Creates an engine for a tree with `total_root_items` top-level items.
    pub fn new(provider: P, total_root_items: usize) -> Self {
        Self::with_config(provider, total_root_items, EngineConfig::default())
    }

    /// Creates an engine with a custom configuration.
    pub fn with_config(provider: P, total_root_items: usize, config: EngineConfig) -> Self {
        Self {
            provider,
            config,
            tree: ExpansionTree::new(total_root_items),
            viewport: Viewport::default(),
            generation: 0,
            total_rows: total_root_items,
            page: Page::default(),
        }
    }

    /// Returns the data provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the expansion tree.
    pub fn tree(&self) -> &ExpansionTree {
        &self.tree
    }

    /// Returns the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the most recently merged page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Total virtual rows as of the last windowing pass.
    ///
    /// This is what the scrollbar should be sized against.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Scrollable content height in pixels as of the last windowing pass.
    pub fn content_height(&self) -> u64 {
        self.total_rows as u64 * self.config.row_height as u64
    }

    /// Returns `true` if the item is currently expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.tree.is_expanded(id)
    }

    fn bump(&mut self, reason: &str) {
        self.generation += 1;
        log::debug!("[engine] generation {} ({})", self.generation, reason);
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Replaces the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.bump("viewport");
        }
    }

    /// Scrolls so that `row` is the first visible row.
    pub fn scroll_to(&mut self, row: usize) {
        self.set_viewport(self.viewport.scrolled_to(row));
    }

    /// Scrolls to a pixel offset, rounding partially scrolled rows up.
    pub fn scroll_to_pixels(&mut self, scroll_top: u32) {
        let viewport = Viewport::from_pixels(scroll_top, 0, self.config.row_height);
        self.scroll_to(viewport.scroll);
    }

    /// Resizes the viewport to `rows` rows.
    pub fn resize(&mut self, rows: usize) {
        self.set_viewport(self.viewport.resized_to(rows));
    }

    /// Resizes the viewport to the rows that fit in `height` pixels.
    pub fn resize_pixels(&mut self, height: u32) {
        let viewport = Viewport::from_pixels(0, height, self.config.row_height);
        self.resize(viewport.rows);
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Updates the number of top-level items.
    pub fn set_root_children(&mut self, total_root_items: usize) {
        if self.tree.root().children() != total_root_items {
            self.tree.set_root_children(total_root_items);
            self.bump("root count");
        }
    }

    /// Expands an item. Returns `Ok(false)` if it was already expanded.
    pub fn expand(
        &mut self,
        id: &str,
        parent: Option<&str>,
        offset: usize,
        children: usize,
    ) -> Result<bool, Error> {
        let expanded = self.tree.expand(id, parent, offset, children)?;
        if expanded {
            self.bump("expand");
        }
        Ok(expanded)
    }

    /// Collapses an item and everything expanded beneath it.
    ///
    /// Returns `false` if it was not expanded.
    pub fn collapse(&mut self, id: &str, parent: Option<&str>) -> bool {
        let collapsed = self.tree.collapse(id, parent);
        if collapsed {
            self.bump("collapse");
        }
        collapsed
    }

    /// Expands the item under `parent` if collapsed there, collapses it otherwise.
    pub fn toggle(
        &mut self,
        id: &str,
        parent: Option<&str>,
        offset: usize,
        children: usize,
    ) -> Result<Toggled, Error> {
        if self.tree.is_expanded_under(id, parent) {
            self.collapse(id, parent);
            Ok(Toggled::Collapsed)
        } else {
            self.expand(id, parent, offset, children)?;
            Ok(Toggled::Expanded)
        }
    }

    // -------------------------------------------------------------------------
    // Windowing
    // -------------------------------------------------------------------------

    /// Starts a windowing pass for the current viewport.
    ///
    /// Any request prepared earlier becomes stale.
    pub fn prepare(&mut self) -> Request {
        self.bump("prepare");
        let queries = build_queries(&mut self.tree, self.viewport);
        self.total_rows = self.tree.total_rows();

        Request {
            generation: self.generation,
            viewport: self.viewport,
            queries,
            total_rows: self.total_rows,
        }
    }

    /// Completes a windowing pass with the provider's batches.
    ///
    /// Returns `Ok(None)` if the request is stale; its batches are discarded.
    pub fn complete(&mut self, request: &Request, batches: Vec<Batch>) -> Result<Option<&Page>, Error> {
        if request.generation != self.generation {
            log::debug!(
                "[engine] discarding response for generation {} (current {})",
                request.generation,
                self.generation
            );
            return Ok(None);
        }

        let rows = merge_batches(&self.tree, &request.queries, batches)?;
        self.page = Page::new(request.generation, request.viewport, rows, request.total_rows);
        Ok(Some(&self.page))
    }

    /// Runs a full windowing pass: prepare, fetch and merge.
    pub async fn refresh(&mut self) -> Result<Option<&Page>, Error> {
        let request = self.prepare();
        let batches = self.provider.fetch(&request.queries).await?;
        self.complete(&request, batches)
    }

    /// Toggles a rendered row and refreshes.
    pub async fn toggle_row(&mut self, row: &RenderedRow) -> Result<Option<&Page>, Error> {
        self.toggle(row.id(), row.parent(), row.offset, row.children())?;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::InMemoryProvider;

    fn engine(roots: usize, fan_out: usize, depth: usize) -> VirtualTree<InMemoryProvider> {
        VirtualTree::new(InMemoryProvider::generate(roots, fan_out, depth), roots)
    }

    #[test]
    fn test_viewport_change_bumps_generation() {
        let mut engine = engine(10, 0, 0);
        engine.set_viewport(Viewport::new(0, 5));
        let generation = engine.generation();

        engine.set_viewport(Viewport::new(0, 5));
        assert_eq!(engine.generation(), generation);

        engine.scroll_to(3);
        assert_eq!(engine.generation(), generation + 1);
        assert_eq!(engine.viewport(), Viewport::new(3, 5));
    }

    #[test]
    fn test_pixel_geometry() {
        let mut engine = engine(10, 0, 0);
        engine.resize_pixels(335);
        engine.scroll_to_pixels(33);
        assert_eq!(engine.viewport(), Viewport::new(2, 10));
    }

    #[test]
    fn test_duplicate_expand_does_not_bump() {
        let mut engine = engine(5, 2, 1);
        assert!(engine.expand("1", None, 1, 2).unwrap());
        let generation = engine.generation();
        assert!(!engine.expand("1", None, 1, 2).unwrap());
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn test_toggle_dispatches() {
        let mut engine = engine(5, 2, 1);
        assert_eq!(engine.toggle("2", None, 2, 2).unwrap(), Toggled::Expanded);
        assert!(engine.is_expanded("2"));
        assert_eq!(engine.toggle("2", None, 2, 2).unwrap(), Toggled::Collapsed);
        assert!(!engine.is_expanded("2"));
    }

    #[test]
    fn test_toggle_matches_parent() {
        let mut engine = engine(3, 2, 1);
        engine.expand("0", None, 0, 2).unwrap();
        engine.expand("x", Some("0"), 1, 1).unwrap();

        // Same id under another parent is a separate expansion.
        assert_eq!(engine.toggle("x", None, 2, 1).unwrap(), Toggled::Expanded);
        assert!(engine.tree().is_expanded_under("x", None));
        assert!(engine.tree().is_expanded_under("x", Some("0")));

        assert_eq!(engine.toggle("x", Some("0"), 1, 1).unwrap(), Toggled::Collapsed);
        assert!(!engine.tree().is_expanded_under("x", Some("0")));
        assert!(engine.tree().is_expanded_under("x", None));
    }

    #[tokio::test]
    async fn test_refresh_with_childless_expansion() {
        let mut engine = engine(3, 0, 0);
        engine.resize(5);
        engine.expand("1", None, 1, 0).unwrap();

        let page = engine.refresh().await.unwrap().cloned().unwrap();
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert!(page.rows()[1].expanded);
        assert_eq!(page.total_rows(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_page() {
        let mut engine = engine(4, 0, 0);
        engine.resize(2);
        engine.refresh().await.unwrap();

        engine.provider().set_available(false);
        engine.scroll_to(2);
        let err = engine.refresh().await.unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Unavailable(_))));
        assert_eq!(engine.page().ids().collect::<Vec<_>>(), vec!["0", "1"]);
    }

    #[test]
    fn test_prepare_reports_total_rows() {
        let mut engine = engine(5, 3, 1);
        engine.resize(4);
        engine.expand("0", None, 0, 3).unwrap();
        let request = engine.prepare();

        assert_eq!(request.total_rows, 8);
        assert_eq!(engine.total_rows(), 8);
        assert_eq!(engine.content_height(), 8 * 32);
        assert_eq!(
            request.queries,
            vec![Query::new(None, 0, 1), Query::new(Some("0"), 0, 3)]
        );
    }

    #[test]
    fn test_stale_request_discarded() {
        let mut engine = engine(5, 0, 0);
        engine.resize(3);
        let stale = engine.prepare();
        engine.scroll_to(1);

        let batches = vec![Batch::new(None, Vec::new())];
        assert_eq!(engine.complete(&stale, batches).unwrap(), None);
        assert!(engine.page().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_builds_page() {
        let mut engine = engine(5, 0, 0);
        engine.resize(3);
        engine.scroll_to(1);

        let page = engine.refresh().await.unwrap().cloned().unwrap();
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(page.total_rows(), 5);
        assert_eq!(page.generation(), engine.generation());
    }

    #[tokio::test]
    async fn test_toggle_row_expands_and_refreshes() {
        let mut engine = engine(3, 2, 1);
        engine.resize(5);
        let first = engine.refresh().await.unwrap().cloned().unwrap();
        let row = first.rows()[0].clone();

        let page = engine.toggle_row(&row).await.unwrap().cloned().unwrap();
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["0", "0.0", "0.1", "1", "2"]);
        assert!(page.rows()[0].expanded);
        assert_eq!(page.rows()[1].indent, 1);

        let page = engine.toggle_row(&row).await.unwrap().cloned().unwrap();
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["0", "1", "2"]);
        assert!(page.is_short());
    }
}
