//! Viewport geometry.

use serde::Deserialize;
use serde::Serialize;

/// The window of virtual rows currently on screen.
///
/// Recomputed from scratch on every scroll or resize; no scroll deltas are
/// retained between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Virtual index of the first visible row.
    pub scroll: usize,
    /// Number of rows that fit on screen.
    pub rows: usize,
}

impl Viewport {
    /// Creates a viewport showing `rows` rows starting at `scroll`.
    pub fn new(scroll: usize, rows: usize) -> Self {
        Self { scroll, rows }
    }

    /// Converts pixel geometry to a row window.
    ///
    /// A partially scrolled row counts as scrolled past, and only rows that
    /// fit completely are shown.
    pub fn from_pixels(scroll_top: u32, height: u32, row_height: u32) -> Self {
        if row_height == 0 {
            return Self::default();
        }
        Self {
            scroll: scroll_top.div_ceil(row_height) as usize,
            rows: (height / row_height) as usize,
        }
    }

    /// Returns the index of the last visible row, `None` for an empty viewport.
    pub fn last(&self) -> Option<usize> {
        (self.scroll + self.rows).checked_sub(1).filter(|_| self.rows > 0)
    }

    /// Returns `true` if no rows fit on screen.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns `true` if the inclusive row range `[start, end]` overlaps the viewport.
    pub fn intersects(&self, start: i64, end: i64) -> bool {
        match self.last() {
            Some(last) => !(end < self.scroll as i64 || start > last as i64),
            None => false,
        }
    }

    /// Returns a copy scrolled to `scroll`.
    pub fn scrolled_to(self, scroll: usize) -> Self {
        Self { scroll, ..self }
    }

    /// Returns a copy resized to `rows`.
    pub fn resized_to(self, rows: usize) -> Self {
        Self { rows, ..self }
    }
}
