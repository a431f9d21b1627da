//! End-to-end windowing scenarios.

use vtree_lib::error::Error;
use vtree_lib::provider::{Batch, DataProvider, InMemoryProvider, Row};
use vtree_lib::tree::ExpansionTree;
use vtree_lib::window::merge_batches;
use vtree_lib::{Query, Viewport, VirtualTree};

fn engine(roots: usize, fan_out: usize, depth: usize) -> VirtualTree<InMemoryProvider> {
    VirtualTree::new(InMemoryProvider::generate(roots, fan_out, depth), roots)
}

// =============================================================================
// Query synthesis
// =============================================================================

#[test]
fn test_flat_root_single_query() {
    let mut engine = engine(5, 0, 0);
    engine.set_viewport(Viewport::new(0, 5));

    let request = engine.prepare();
    assert_eq!(request.queries, vec![Query::new(None, 0, 5)]);
}

#[tokio::test]
async fn test_expanded_child_splits_queries() {
    let mut engine = engine(3, 2, 1);
    engine.set_viewport(Viewport::new(0, 4));
    engine.expand("1", None, 1, 2).unwrap();

    let request = engine.prepare();
    assert_eq!(
        request.queries,
        vec![Query::new(None, 0, 2), Query::new(Some("1"), 0, 2)]
    );

    let batches = engine.provider().fetch(&request.queries).await.unwrap();
    let page = engine.complete(&request, batches).unwrap().unwrap();
    assert_eq!(page.ids().collect::<Vec<_>>(), vec!["0", "1", "1.0", "1.1"]);
}

#[tokio::test]
async fn test_collapse_removes_nested_subtree() {
    let mut engine = engine(3, 2, 2);
    engine.set_viewport(Viewport::new(0, 10));
    engine.expand("0", None, 0, 2).unwrap();
    engine.expand("0.1", Some("0"), 1, 2).unwrap();
    engine.expand("2", None, 2, 2).unwrap();

    assert!(engine.collapse("0", None));
    let request = engine.prepare();
    for query in &request.queries {
        let parent = query.parent.as_deref().unwrap_or_default();
        assert!(!parent.starts_with('0'), "query for collapsed {:?}", query);
    }

    let page = engine.refresh().await.unwrap().unwrap();
    assert_eq!(page.ids().collect::<Vec<_>>(), vec!["0", "1", "2", "2.0", "2.1"]);
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn test_absent_parent_rows_come_first() {
    let mut tree = ExpansionTree::new(4);
    tree.expand("0", None, 0, 5).unwrap();
    let queries = vec![Query::new(None, 1, 2), Query::new(Some("0"), 3, 2)];
    let batches = vec![
        Batch::new(None, vec![Row::new("1", None, "1"), Row::new("2", None, "2")]),
        Batch::new(
            Some("0"),
            vec![Row::new("0.3", Some("0"), "0.3"), Row::new("0.4", Some("0"), "0.4")],
        ),
    ];

    let rows = merge_batches(&tree, &queries, batches).unwrap();
    let ids: Vec<_> = rows.iter().map(|row| row.id()).collect();
    assert_eq!(ids, vec!["0.3", "0.4", "1", "2"]);
    assert_eq!(rows[0].offset, 3);
    assert_eq!(rows[3].offset, 2);
}

#[tokio::test]
async fn test_scroll_beyond_extent_returns_fewer_rows() {
    let mut engine = engine(5, 0, 0);
    engine.set_viewport(Viewport::new(3, 10));
    let page = engine.refresh().await.unwrap().unwrap();
    assert_eq!(page.ids().collect::<Vec<_>>(), vec!["3", "4"]);
    assert!(page.is_short());

    engine.scroll_to(50);
    let page = engine.refresh().await.unwrap().unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_rows(), 5);
}

#[tokio::test]
async fn test_malformed_provider_fails_fast() {
    let mut engine = engine(5, 0, 0);
    engine.set_viewport(Viewport::new(0, 2));
    let request = engine.prepare();

    let batches = vec![Batch::new(
        None,
        vec![
            Row::new("0", None, "0").with_offset(0),
            Row::new("2", None, "2").with_offset(2),
        ],
    )];
    let err = engine.complete(&request, batches).unwrap_err();
    assert!(matches!(err, Error::Merge(_)));
}

// =============================================================================
// Generations
// =============================================================================

#[tokio::test]
async fn test_response_after_scroll_is_discarded() {
    let mut engine = engine(20, 0, 0);
    engine.set_viewport(Viewport::new(0, 5));
    let first = engine.prepare();
    let first_batches = engine.provider().fetch(&first.queries).await.unwrap();

    engine.scroll_to(10);
    let second = engine.prepare();
    let second_batches = engine.provider().fetch(&second.queries).await.unwrap();

    // The newer response lands first, the older one must not overwrite it.
    let page = engine.complete(&second, second_batches).unwrap().unwrap();
    assert_eq!(page.ids().next(), Some("10"));
    assert!(engine.complete(&first, first_batches).unwrap().is_none());
    assert_eq!(engine.page().ids().next(), Some("10"));
}

#[tokio::test]
async fn test_collapse_mid_flight_discards_response() {
    let mut engine = engine(3, 2, 1);
    engine.set_viewport(Viewport::new(0, 5));
    engine.expand("0", None, 0, 2).unwrap();
    let request = engine.prepare();
    let batches = engine.provider().fetch(&request.queries).await.unwrap();

    engine.collapse("0", None);
    assert!(engine.complete(&request, batches).unwrap().is_none());
    assert!(engine.page().is_empty());

    // Merging the same batches against the collapsed tree drops the orphaned rows.
    let batches = engine.provider().fetch(&request.queries).await.unwrap();
    let rows = merge_batches(engine.tree(), &request.queries, batches).unwrap();
    let ids: Vec<_> = rows.iter().map(|row| row.id()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

#[test]
fn test_expand_is_idempotent_at_engine_level() {
    let mut engine = engine(3, 2, 1);
    engine.expand("1", None, 1, 2).unwrap();
    let once = engine.tree().clone();
    engine.expand("1", None, 1, 2).unwrap();
    assert_eq!(engine.tree(), &once);
}

#[test]
fn test_expand_under_collapsed_parent_is_an_error() {
    let mut engine = engine(3, 2, 2);
    let err = engine.expand("1.0", Some("1"), 0, 2).unwrap_err();
    assert!(matches!(err, Error::Tree(_)));
}
