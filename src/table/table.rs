use crate::error::TableError;
use super::sort::{SortDirection, SortIndicator};

/// Display state of a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowDisplay {
    #[default]
    Displayed,
    HiddenByFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Mirrors the hidden flag of the owning column
    pub hidden: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), hidden: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub display: RowDisplay,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, display: RowDisplay::Displayed }
    }

    pub fn is_displayed(&self) -> bool {
        self.display == RowDisplay::Displayed
    }

    /// Cell text at `col`, or None if the row is short
    pub fn text(&self, col: usize) -> Option<&str> {
        self.cells.get(col).map(|c| c.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub label: String,
    pub hidden: bool,
    pub indicator: SortIndicator,
    /// Set on the single column the rows are currently ordered by
    pub active: bool,
}

impl ColumnHeader {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hidden: false,
            indicator: SortIndicator::Neutral,
            active: false,
        }
    }
}

/// The rendered table: a header row plus data rows, index-aligned by column
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<ColumnHeader>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(labels: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            header: labels.into_iter().map(ColumnHeader::new).collect(),
            rows: rows
                .into_iter()
                .map(|cells| Row::new(cells.into_iter().map(Cell::new).collect()))
                .collect(),
        }
    }

    /// Build a table whose first record is the header
    pub fn from_records(mut records: Vec<Vec<String>>) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let labels = records.remove(0);
        Self::new(labels, records)
    }

    pub fn col_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    pub fn displayed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_displayed()).count()
    }

    #[cfg(test)]
    pub fn get_row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    #[cfg(test)]
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn displayed_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.is_displayed())
    }

    /// Indices of columns whose header is not hidden
    pub fn visible_columns(&self) -> Vec<usize> {
        self.header
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn check_column(&self, col: usize) -> Result<(), TableError> {
        if col < self.col_count() {
            Ok(())
        } else {
            Err(TableError::ColumnOutOfRange { index: col, count: self.col_count() })
        }
    }

    /// Reset every header to neutral, then mark `col` as the sorted column
    pub fn mark_sorted(&mut self, col: usize, direction: SortDirection) {
        for (i, header) in self.header.iter_mut().enumerate() {
            if i == col {
                header.active = true;
                header.indicator = SortIndicator::from(direction);
            } else {
                header.active = false;
                header.indicator = SortIndicator::Neutral;
            }
        }
    }
}
