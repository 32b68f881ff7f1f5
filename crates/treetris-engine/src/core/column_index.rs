use std::collections::BTreeMap;

use crate::OccupancyError;

use super::{cell::Cell, ordered_row_set::OrderedRowSet};

/// Sparse index of occupied cells, keyed by column.
///
/// Each occupied column owns an [`OrderedRowSet`] of its occupied rows, and a
/// separate map tracks how many columns are occupied at each row. Both maps
/// only hold entries for non-empty columns and rows, so the fill count of a
/// row is always the number of columns whose set contains it.
///
/// Ordered maps keep enumeration order a function of the call sequence.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    columns: BTreeMap<i32, OrderedRowSet>,
    row_fill_counts: BTreeMap<i32, usize>,
}

impl ColumnIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: BTreeMap::new(),
            row_fill_counts: BTreeMap::new(),
        }
    }

    /// Marks `(x, y)` as occupied, returning `false` if it already was.
    pub fn add(&mut self, x: i32, y: i32) -> bool {
        let inserted = self.columns.entry(x).or_default().insert(y);
        if inserted {
            *self.row_fill_counts.entry(y).or_default() += 1;
        }
        inserted
    }

    /// Clears `(x, y)`.
    ///
    /// Fails if column `x` has no occupied cells at all. Removing an empty
    /// cell from an occupied column is a no-op and returns `Ok(false)`.
    pub fn remove(&mut self, x: i32, y: i32) -> Result<bool, OccupancyError> {
        let rows = self
            .columns
            .get_mut(&x)
            .ok_or(OccupancyError::MissingColumn { x })?;
        if !rows.remove(y) {
            return Ok(false);
        }
        if rows.is_empty() {
            self.columns.remove(&x);
        }
        self.decrement_row(y);
        Ok(true)
    }

    fn decrement_row(&mut self, y: i32) {
        let Some(count) = self.row_fill_counts.get_mut(&y) else {
            log::warn!("row {y} lost a cell but had no fill count");
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.row_fill_counts.remove(&y);
        }
    }

    /// Drops the fill-count entry of row `y`, returning the discarded count.
    ///
    /// The per-column sets are left untouched: callers must remove the row's
    /// cells first or the counts will disagree with the sets.
    pub fn clear_row_count(&mut self, y: i32) -> Result<usize, OccupancyError> {
        self.row_fill_counts
            .remove(&y)
            .ok_or(OccupancyError::MissingRow { y })
    }

    /// Number of occupied cells in row `y`.
    #[must_use]
    pub fn count(&self, y: i32) -> usize {
        self.row_fill_counts.get(&y).copied().unwrap_or(0)
    }

    /// Number of occupied cells in the whole index.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.columns.values().map(OrderedRowSet::count).sum()
    }

    /// Returns `true` if `(x, y)` is occupied.
    #[must_use]
    pub fn exists(&self, x: i32, y: i32) -> bool {
        self.columns.get(&x).is_some_and(|rows| rows.contains(y))
    }

    /// Finds the nearest occupied cell strictly below `(x, y)` in column `x`.
    pub fn upper_bound(&self, x: i32, y: i32) -> Result<Cell, OccupancyError> {
        let rows = self
            .columns
            .get(&x)
            .ok_or(OccupancyError::MissingColumn { x })?;
        let found = rows
            .upper_bound(y)
            .ok_or(OccupancyError::NoUpperBound { x, y })?;
        Ok(Cell::new(x, found))
    }

    /// Iterates over every occupied cell. The order is unspecified.
    pub fn all_coordinates(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns
            .iter()
            .flat_map(|(&x, rows)| rows.values().map(move |y| Cell::new(x, y)))
    }
}
