use std::fmt::Write as _;

use crate::OccupancyError;

use super::{cell::Cell, column_index::ColumnIndex};

/// Occupied cells of a bounded playfield.
///
/// Bounds are inclusive on both ends: valid columns are `0..=width` and valid
/// rows are `0..=height`, so a grid built with `width = 9, height = 19` has
/// the standard 10×20 cells. Row 0 is the top of the field and row `height`
/// is the floor.
///
/// # Example
///
/// ```
/// use treetris_engine::{Cell, OccupancyGrid};
///
/// let mut grid = OccupancyGrid::new(3, 5);
/// for x in 0..=3 {
///     grid.add_occupied(x, 5).unwrap();
/// }
/// grid.add_occupied(1, 4).unwrap();
/// assert!(grid.is_row_full(5));
///
/// grid.clear_row_and_collapse(5).unwrap();
/// assert!(grid.collide(1, 5));
/// assert!(!grid.collide(1, 4));
/// assert_eq!(grid.nearest_occupied_below(1, 0), Ok(Cell::new(1, 5)));
/// ```
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    index: ColumnIndex,
}

impl OccupancyGrid {
    /// Creates an empty grid of `(width + 1) × (height + 1)` cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
            index: ColumnIndex::new(),
        }
    }

    /// Largest valid column index.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Largest valid row index.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of columns, i.e. the fill count of a full row.
    #[must_use]
    pub fn columns(&self) -> usize {
        usize::try_from(self.width + 1).unwrap_or_default()
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        usize::try_from(self.height + 1).unwrap_or_default()
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[must_use]
    pub const fn valid_location(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x <= self.width && y <= self.height
    }

    /// Returns `true` if `(x, y)` is occupied. Out-of-bounds cells never are.
    #[must_use]
    pub fn collide(&self, x: i32, y: i32) -> bool {
        self.index.exists(x, y)
    }

    /// Finds the nearest occupied cell strictly below `(x, y)`.
    ///
    /// Used to compute where a falling piece comes to rest. Callers usually
    /// treat [`OccupancyError::MissingColumn`] and
    /// [`OccupancyError::NoUpperBound`] as "falls to the floor".
    pub fn nearest_occupied_below(&self, x: i32, y: i32) -> Result<Cell, OccupancyError> {
        let found = self.index.upper_bound(x, y)?;
        if !self.valid_location(found.x, found.y) {
            return Err(OccupancyError::InvalidTarget {
                x: found.x,
                y: found.y,
            });
        }
        Ok(found)
    }

    /// Number of occupied cells in row `y`.
    #[must_use]
    pub fn row_count(&self, y: i32) -> usize {
        self.index.count(y)
    }

    /// Returns `true` if every column of row `y` is occupied.
    #[must_use]
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_count(y) == self.columns()
    }

    /// Number of occupied cells in the whole grid.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.index.total_count()
    }

    /// Iterates over every occupied cell. The order is unspecified.
    pub fn all_coordinates(&self) -> impl Iterator<Item = Cell> + '_ {
        self.index.all_coordinates()
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<(), OccupancyError> {
        if self.valid_location(x, y) {
            Ok(())
        } else {
            Err(OccupancyError::OutOfBounds { x, y })
        }
    }

    /// Marks `(x, y)` as occupied. Re-adding an occupied cell changes nothing.
    pub fn add_occupied(&mut self, x: i32, y: i32) -> Result<(), OccupancyError> {
        self.check_bounds(x, y)?;
        self.index.add(x, y);
        Ok(())
    }

    /// Clears `(x, y)`.
    ///
    /// Fails with [`OccupancyError::MissingColumn`] if column `x` has no
    /// occupied cells.
    pub fn remove_occupied(&mut self, x: i32, y: i32) -> Result<(), OccupancyError> {
        self.check_bounds(x, y)?;
        self.index.remove(x, y)?;
        Ok(())
    }

    /// Removes row `y` and shifts every row above it down by one.
    ///
    /// Rows below `y` are untouched and row 0 is left empty. The whole region
    /// above `y` is rescanned cell by cell, so a multi-row clear is resolved by
    /// calling this once per row against the then-current state.
    ///
    /// Returns the number of cells that were removed from row `y`, or
    /// [`OccupancyError::RowOutOfBounds`] without touching the grid if `y` is
    /// not a row of this grid.
    pub fn clear_row_and_collapse(&mut self, y: i32) -> Result<usize, OccupancyError> {
        if !(0..=self.height).contains(&y) {
            return Err(OccupancyError::RowOutOfBounds { y });
        }

        let removed = self.take_row(y)?.len();

        let mut shifted = vec![];
        for j in (0..y).rev() {
            shifted.extend(self.take_row(j)?);
        }
        for cell in &shifted {
            self.index.add(cell.x, cell.y + 1);
        }

        log::debug!(
            "cleared row {y}: removed {removed} cells, shifted {} cells down",
            shifted.len()
        );
        Ok(removed)
    }

    /// Removes every occupied cell of row `y` and drops its fill count.
    fn take_row(&mut self, y: i32) -> Result<Vec<Cell>, OccupancyError> {
        let mut taken = vec![];
        for x in 0..=self.width {
            if self.collide(x, y) {
                self.remove_occupied(x, y)?;
                taken.push(Cell::new(x, y));
            }
        }
        if let Ok(stale) = self.index.clear_row_count(y) {
            log::warn!("row {y} still had a fill count of {stale} after removing its cells");
        }
        Ok(taken)
    }

    /// Builds a grid from ASCII art, `#` for occupied and `.` for empty.
    ///
    /// Each non-blank line is one row, top row first; whitespace is ignored.
    /// The grid takes the dimensions of the art.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths or the art is empty.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| *c == '#' || *c == '.').collect())
            .filter(|row: &Vec<char>| !row.is_empty())
            .collect();
        assert!(!rows.is_empty(), "ASCII grid must have at least one row");
        let row_width = rows[0].len();
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                row_width,
                "Each row must have exactly {row_width} cells, got {} at row {y}",
                row.len()
            );
        }

        let width = u16::try_from(row_width - 1).expect("ASCII grid is too wide");
        let height = u16::try_from(rows.len() - 1).expect("ASCII grid is too tall");
        let mut grid = Self::new(width, height);
        for (y, row) in (0..).zip(&rows) {
            for (x, &ch) in (0..).zip(row) {
                if ch == '#' {
                    grid.index.add(x, y);
                }
            }
        }
        grid
    }

    /// Renders the grid as ASCII art, one `String` per row, top row first.
    #[must_use]
    pub fn to_ascii_rows(&self) -> Vec<String> {
        (0..=self.height)
            .map(|y| {
                (0..=self.width)
                    .map(|x| if self.collide(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    /// Renders the grid as ASCII art, rows separated by newlines.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut art = String::with_capacity(self.rows() * (self.columns() + 1));
        for row in self.to_ascii_rows() {
            // writing to a String cannot fail
            let _ = writeln!(art, "{row}");
        }
        art
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn fill_row(grid: &mut OccupancyGrid, y: i32) {
        for x in 0..=grid.width() {
            grid.add_occupied(x, y).unwrap();
        }
    }

    fn occupied(grid: &OccupancyGrid) -> BTreeSet<Cell> {
        grid.all_coordinates().collect()
    }

    #[test]
    fn test_valid_location_is_inclusive() {
        let grid = OccupancyGrid::new(9, 19);

        assert!(grid.valid_location(0, 0));
        assert!(grid.valid_location(9, 19));
        assert!(!grid.valid_location(10, 19));
        assert!(!grid.valid_location(9, 20));
        assert!(!grid.valid_location(-1, 0));
        assert!(!grid.valid_location(0, -1));
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.rows(), 20);
    }

    #[test]
    fn test_add_and_remove_out_of_bounds() {
        let mut grid = OccupancyGrid::new(4, 4);

        assert_eq!(
            grid.add_occupied(5, 0),
            Err(OccupancyError::OutOfBounds { x: 5, y: 0 })
        );
        assert_eq!(
            grid.remove_occupied(0, -1),
            Err(OccupancyError::OutOfBounds { x: 0, y: -1 })
        );
        assert_eq!(grid.total_count(), 0);
    }

    #[test]
    fn test_remove_from_empty_column() {
        let mut grid = OccupancyGrid::new(4, 4);
        assert_eq!(
            grid.remove_occupied(2, 2),
            Err(OccupancyError::MissingColumn { x: 2 })
        );
    }

    #[test]
    fn test_nearest_occupied_below() {
        let mut grid = OccupancyGrid::new(4, 10);
        grid.add_occupied(2, 6).unwrap();
        grid.add_occupied(2, 9).unwrap();

        assert_eq!(grid.nearest_occupied_below(2, 0), Ok(Cell::new(2, 6)));
        assert_eq!(grid.nearest_occupied_below(2, 6), Ok(Cell::new(2, 9)));
        assert_eq!(grid.nearest_occupied_below(2, -3), Ok(Cell::new(2, 6)));
        assert_eq!(
            grid.nearest_occupied_below(2, 9),
            Err(OccupancyError::NoUpperBound { x: 2, y: 9 })
        );
        assert_eq!(
            grid.nearest_occupied_below(3, 0),
            Err(OccupancyError::MissingColumn { x: 3 })
        );
    }

    #[test]
    fn test_clear_row_shifts_rows_above_down() {
        // 16 columns
        let mut grid = OccupancyGrid::new(15, 100);
        fill_row(&mut grid, 1);
        grid.add_occupied(5, 0).unwrap();
        assert!(grid.is_row_full(1));

        assert_eq!(grid.clear_row_and_collapse(1), Ok(16));

        assert!(!grid.collide(5, 0));
        assert!(grid.collide(5, 1));
        assert_eq!(grid.total_count(), 1);
        for i in 0..16 {
            assert!(!grid.collide(i, 100));
        }
    }

    #[test]
    fn test_clear_top_row_keeps_rows_below() {
        let mut grid = OccupancyGrid::new(15, 100);
        fill_row(&mut grid, 0);
        grid.add_occupied(5, 1).unwrap();

        assert_eq!(grid.clear_row_and_collapse(0), Ok(16));

        assert!(grid.collide(5, 1));
        assert_eq!(grid.row_count(0), 0);
        assert_eq!(grid.total_count(), 1);
    }

    #[test]
    fn test_clear_row_and_collapse_from_ascii() {
        let mut grid = OccupancyGrid::from_ascii(
            r"
            .#..
            #..#
            ####
            ##.#
            ",
        );

        grid.clear_row_and_collapse(2).unwrap();

        assert_eq!(
            grid.to_ascii_rows(),
            [
                "....",
                ".#..",
                "#..#",
                "##.#",
            ]
        );
        assert_eq!(grid.row_count(0), 0);
        assert_eq!(grid.row_count(1), 1);
        assert_eq!(grid.row_count(2), 2);
        assert_eq!(grid.row_count(3), 3);
    }

    #[test]
    fn test_clear_empty_row_still_collapses() {
        let mut grid = OccupancyGrid::from_ascii(
            r"
            #...
            ....
            ..##
            ",
        );

        assert_eq!(grid.clear_row_and_collapse(1), Ok(0));
        assert_eq!(grid.to_ascii(), "....\n#...\n..##\n");
    }

    #[test]
    fn test_clear_row_out_of_bounds() {
        let mut grid = OccupancyGrid::new(3, 3);
        grid.add_occupied(0, 0).unwrap();

        assert_eq!(
            grid.clear_row_and_collapse(4),
            Err(OccupancyError::RowOutOfBounds { y: 4 })
        );
        assert_eq!(
            grid.clear_row_and_collapse(-1),
            Err(OccupancyError::RowOutOfBounds { y: -1 })
        );
        assert!(grid.collide(0, 0));
        assert_eq!(grid.total_count(), 1);
    }

    #[test]
    fn test_consecutive_clears() {
        let mut grid = OccupancyGrid::from_ascii(
            r"
            ..#.
            ####
            ####
            .#..
            ",
        );

        // clear top-most full row first, then the one below it
        grid.clear_row_and_collapse(1).unwrap();
        grid.clear_row_and_collapse(2).unwrap();

        assert_eq!(grid.to_ascii(), "....\n....\n..#.\n.#..\n");
        assert_eq!(grid.total_count(), 2);
    }

    #[test]
    fn test_ascii_round_trip() {
        let art = "#..\n.#.\n..#\n...\n";
        let grid = OccupancyGrid::from_ascii(art);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.to_ascii(), art);
    }

    proptest! {
        #[test]
        fn prop_clear_row_matches_model(
            cells in prop::collection::btree_set((0i32..6, 0i32..8), 0..40),
            y in 0i32..8,
        ) {
            let mut grid = OccupancyGrid::new(5, 7);
            for &(x, cy) in &cells {
                grid.add_occupied(x, cy).unwrap();
            }

            let removed = grid.clear_row_and_collapse(y).unwrap();

            let expected: BTreeSet<_> = cells
                .iter()
                .filter(|&&(_, cy)| cy != y)
                .map(|&(x, cy)| if cy < y { Cell::new(x, cy + 1) } else { Cell::new(x, cy) })
                .collect();
            prop_assert_eq!(removed, cells.iter().filter(|&&(_, cy)| cy == y).count());
            prop_assert_eq!(occupied(&grid), expected.clone());
            prop_assert_eq!(grid.total_count(), expected.len());
            for row in 0..8 {
                let in_row = expected.iter().filter(|cell| cell.y == row).count();
                prop_assert_eq!(grid.row_count(row), in_row);
            }
        }
    }
}
