//! Free-text row filtering

use rayon::prelude::*;
use tracing::debug;

use super::table::{Row, RowDisplay, Table};

/// Threshold for using parallel processing (rows * cols)
const PARALLEL_THRESHOLD: usize = 10_000;

/// True if any cell of `row` contains `needle` (already lowercased).
/// Cells in hidden columns are matched as well. The empty needle matches every row.
fn row_matches(row: &Row, needle: &str) -> bool {
    needle.is_empty() || row.cells.iter().any(|cell| cell.text.to_lowercase().contains(needle))
}

impl Table {
    /// Show rows containing `query` (case-insensitive) in at least one cell, hide the rest.
    /// Returns the number of rows left displayed.
    pub fn apply_filter(&mut self, query: &str) -> usize {
        let needle = query.to_lowercase();
        let update = |row: &mut Row| {
            row.display = if row_matches(row, &needle) {
                RowDisplay::Displayed
            } else {
                RowDisplay::HiddenByFilter
            };
        };

        if self.cell_count() >= PARALLEL_THRESHOLD {
            self.rows.par_iter_mut().for_each(update);
        } else {
            self.rows.iter_mut().for_each(update);
        }

        let shown = self.displayed_count();
        debug!(query, shown, total = self.row_count(), "applied filter");
        shown
    }
}
