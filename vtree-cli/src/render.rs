//! Plain-text rendering of a page.

use vtree_lib::{EngineConfig, Page, RenderedRow};

const EXPANDED: &str = "\u{229f}";
const COLLAPSED: &str = "\u{229e}";

/// Pixels represented by one terminal column.
const COLUMN_WIDTH: u32 = 10;

/// Render one row: indentation, expander glyph (if expandable) and label.
pub fn row_line(row: &RenderedRow, config: &EngineConfig) -> String {
    let columns = row.indent_px(config.indent_width).div_ceil(COLUMN_WIDTH);
    let indent = " ".repeat(columns as usize);
    let expander = if !row.row.is_expandable() {
        " "
    } else if row.expanded {
        EXPANDED
    } else {
        COLLAPSED
    };
    format!("{}{} {}", indent, expander, row.row.label)
}

/// Render the page followed by a status line.
pub fn page_lines(page: &Page, config: &EngineConfig) -> Vec<String> {
    let mut lines: Vec<String> = page.rows().iter().map(|row| row_line(row, config)).collect();

    let first = page.viewport().scroll;
    let height = page.content_height(config.row_height);
    let status = if page.is_empty() {
        format!("-- no rows at {} of {} ({}px) --", first, page.total_rows(), height)
    } else {
        format!(
            "-- rows {}-{} of {} ({}px) --",
            first,
            first + page.len() - 1,
            page.total_rows(),
            height
        )
    };
    lines.push(status);
    lines
}

#[cfg(test)]
mod tests {
    use vtree_lib::Viewport;
    use vtree_lib::provider::Row;

    use super::*;

    fn rendered(row: Row, indent: usize, expanded: bool) -> RenderedRow {
        RenderedRow {
            offset: row.offset.unwrap_or(0),
            row,
            indent,
            expanded,
        }
    }

    #[test]
    fn test_row_line() {
        let config = EngineConfig::default();
        let leaf = rendered(Row::new("0.1", Some("0"), "Item 0.1"), 1, false);
        assert_eq!(row_line(&leaf, &config), "    Item 0.1");

        let open = rendered(Row::new("0", None, "Item 0").with_children(2), 0, true);
        assert_eq!(row_line(&open, &config), "\u{229f} Item 0");

        let closed = rendered(Row::new("1", None, "Item 1").with_children(2), 0, false);
        assert_eq!(row_line(&closed, &config), "\u{229e} Item 1");
    }

    #[test]
    fn test_indent_follows_config() {
        let row = rendered(Row::new("0.0.1", Some("0.0"), "Item 0.0.1"), 2, false);

        let wide = EngineConfig::default().with_indent_width(40);
        assert_eq!(row_line(&row, &wide), format!("{}Item 0.0.1", " ".repeat(10)));

        let flat = EngineConfig::default().with_indent_width(0);
        assert_eq!(row_line(&row, &flat), "  Item 0.0.1");
    }

    #[test]
    fn test_status_line() {
        let rows = vec![
            rendered(Row::new("4", None, "Item 4"), 0, false),
            rendered(Row::new("5", None, "Item 5"), 0, false),
        ];
        let config = EngineConfig::default().with_row_height(24);
        let page = Page::new(3, Viewport::new(4, 10), rows, 6);
        let lines = page_lines(&page, &config);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("-- rows 4-5 of 6 (144px) --")
        );

        let empty = Page::new(3, Viewport::new(9, 10), Vec::new(), 6);
        assert_eq!(
            page_lines(&empty, &config),
            vec!["-- no rows at 9 of 6 (144px) --"]
        );
    }
}
