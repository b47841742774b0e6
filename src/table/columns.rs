use tracing::debug;

use crate::error::TableError;
use super::table::Table;

impl Table {
    /// Flip visibility of column `col` in the header and in every row, filtered or not.
    /// Returns the new hidden flag.
    pub fn toggle_column(&mut self, col: usize) -> Result<bool, TableError> {
        self.check_column(col)?;

        let hidden = !self.header[col].hidden;
        self.header[col].hidden = hidden;

        for row in self.rows.iter_mut() {
            // short rows have nothing to toggle
            if let Some(cell) = row.cells.get_mut(col) {
                cell.hidden = !cell.hidden;
            }
        }

        debug!(col, hidden, "toggled column");
        Ok(hidden)
    }

    pub fn is_column_hidden(&self, col: usize) -> bool {
        self.header.get(col).map(|h| h.hidden).unwrap_or(false)
    }
}
