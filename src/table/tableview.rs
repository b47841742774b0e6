use crate::error::TableError;
use super::sort::{self, SortDirection, SortState};
use super::table::Table;

/// The table together with its interaction state (sort memory, filter query, cursor, viewport)
#[derive(Debug, Clone)]
pub struct TableView {
    pub table: Table,
    pub sort_state: SortState,
    pub query: String,

    // Selected column and first displayed row (index among displayed rows)
    pub cursor_col: usize,
    pub cursor_row: usize,
    pub viewport_row: usize,
    pub viewport_height: usize,
}

impl TableView {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            sort_state: SortState::new(),
            query: String::new(),
            cursor_col: 0,
            cursor_row: 0,
            viewport_row: 0,
            viewport_height: 20,
        }
    }

    pub fn apply_filter(&mut self, query: &str) -> usize {
        self.query = query.to_string();
        let shown = self.table.apply_filter(query);
        self.clamp_cursor();
        shown
    }

    pub fn apply_sort(&mut self, col: usize) -> Result<SortDirection, TableError> {
        sort::apply_sort(&mut self.table, &mut self.sort_state, col)
    }

    pub fn toggle_column(&mut self, col: usize) -> Result<bool, TableError> {
        self.table.toggle_column(col)
    }

    pub fn sort_cursor_column(&mut self) -> Result<SortDirection, TableError> {
        self.apply_sort(self.cursor_col)
    }

    pub fn toggle_cursor_column(&mut self) -> Result<bool, TableError> {
        self.toggle_column(self.cursor_col)
    }

    /// Ensure cursor is within table bounds
    pub fn clamp_cursor(&mut self) {
        let displayed = self.table.displayed_count();
        self.cursor_row = self.cursor_row.min(displayed.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.table.col_count().saturating_sub(1));
        self.scroll_to_cursor();
    }

    /// Ensure viewport contains the cursor
    pub fn scroll_to_cursor(&mut self) {
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.viewport_height > 0 && self.cursor_row >= self.viewport_row + self.viewport_height {
            self.viewport_row = self.cursor_row + 1 - self.viewport_height;
        }
    }

    // Navigation methods
    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col + 1 < self.table.col_count() {
            self.cursor_col += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.table.displayed_count() {
            self.cursor_row += 1;
            self.scroll_to_cursor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: Vec<Vec<&str>>) -> TableView {
        let labels = vec!["Name".to_string(), "Size".to_string()];
        let rows = rows.into_iter().map(|r| r.into_iter().map(String::from).collect()).collect();
        TableView::new(Table::new(labels, rows))
    }

    #[test]
    fn test_filter_records_query_and_clamps_cursor() {
        let mut v = view(vec![vec!["a", "1"], vec!["b", "2"], vec!["c", "3"]]);
        v.cursor_row = 2;
        assert_eq!(v.apply_filter("a"), 1);
        assert_eq!(v.query, "a");
        assert_eq!(v.cursor_row, 0);
    }

    #[test]
    fn test_cursor_column_actions() {
        let mut v = view(vec![vec!["b", "1"], vec!["a", "2"]]);
        v.move_right();
        v.move_right();
        assert_eq!(v.cursor_col, 1);
        v.move_left();
        assert_eq!(v.sort_cursor_column(), Ok(SortDirection::Ascending));
        assert_eq!(v.table.rows[0].text(0), Some("a"));
        assert_eq!(v.toggle_cursor_column(), Ok(true));
        assert!(v.table.is_column_hidden(0));
    }

    #[test]
    fn test_scrolling_follows_cursor() {
        let rows = (0..10).map(|i| vec![i.to_string(), String::new()]).collect();
        let mut v = TableView::new(Table::new(vec!["n".into(), "x".into()], rows));
        v.viewport_height = 3;
        for _ in 0..5 {
            v.move_down();
        }
        assert_eq!(v.cursor_row, 5);
        assert_eq!(v.viewport_row, 3);
        for _ in 0..5 {
            v.move_up();
        }
        assert_eq!(v.viewport_row, 0);
    }
}
