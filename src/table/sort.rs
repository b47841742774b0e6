//! Single-column sorting for Table

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::error::TableError;
use super::table::Table;

/// Threshold for using parallel processing
const PARALLEL_THRESHOLD: usize = 10_000;

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction applied after `previous`: unsorted and descending go ascending
    pub fn next(previous: Option<SortDirection>) -> Self {
        match previous {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            Some(SortDirection::Descending) | None => SortDirection::Ascending,
        }
    }
}

/// Glyph shown next to a column label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortIndicator {
    #[default]
    Neutral,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn glyph(&self) -> &'static str {
        match self {
            SortIndicator::Neutral => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

impl From<SortDirection> for SortIndicator {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        }
    }
}

/// Last applied direction per column. Never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    directions: HashMap<usize, SortDirection>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self, col: usize) -> Option<SortDirection> {
        self.directions.get(&col).copied()
    }

    /// Advance the toggle for `col` and return the new direction
    pub fn advance(&mut self, col: usize) -> SortDirection {
        let next = SortDirection::next(self.direction(col));
        self.directions.insert(col, next);
        next
    }
}

impl Table {
    /// Row order after sorting by `sort_col`: permutation[i] is the old index of new row i.
    /// Keys are trimmed cell text compared as plain strings; ties keep their prior order.
    pub fn get_sorted_row_indices(&self, sort_col: usize, direction: SortDirection) -> Vec<usize> {
        let mut keyed: Vec<(usize, &str)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row.text(sort_col).map(str::trim).unwrap_or("")))
            .collect();

        let cmp_fn = |&(i, a): &(usize, &str), &(j, b): &(usize, &str)| -> Ordering {
            let base = a.cmp(b);
            match direction {
                SortDirection::Ascending => base.then(i.cmp(&j)),
                SortDirection::Descending => base.reverse().then(i.cmp(&j)),
            }
        };

        if self.row_count() >= PARALLEL_THRESHOLD {
            keyed.par_sort_unstable_by(cmp_fn);
        } else {
            keyed.sort_unstable_by(cmp_fn);
        }

        keyed.into_iter().map(|(row, _)| row).collect()
    }

    /// Reorder rows in place.
    /// permutation[i] = j means row i in the new table comes from row j in the old table
    pub fn apply_row_permutation(&mut self, permutation: &[usize]) {
        if permutation.len() != self.row_count() {
            return;
        }

        let mut old_rows: Vec<Option<_>> = std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = permutation
            .iter()
            .filter_map(|&src| old_rows.get_mut(src).and_then(Option::take))
            .collect();
    }

    /// Sort rows by `col` in `direction` and update the header indicators
    pub fn sort_by_column(&mut self, col: usize, direction: SortDirection) -> Result<(), TableError> {
        self.check_column(col)?;
        let permutation = self.get_sorted_row_indices(col, direction);
        self.apply_row_permutation(&permutation);
        self.mark_sorted(col, direction);
        debug!(col, ?direction, rows = self.row_count(), "sorted table");
        Ok(())
    }
}

/// Toggle-sort `table` by `col`, recording the applied direction in `state`
pub fn apply_sort(table: &mut Table, state: &mut SortState, col: usize) -> Result<SortDirection, TableError> {
    table.check_column(col)?;
    let direction = state.advance(col);
    table.sort_by_column(col, direction)?;
    Ok(direction)
}
