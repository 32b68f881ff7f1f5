use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Cell, PlacementError};

/// Maximum number of cells a single placement may cover.
pub const MAX_PLACEMENT_CELLS: usize = 4;

/// The cells a landed piece contributes to the grid.
///
/// A placement holds between 1 and [`MAX_PLACEMENT_CELLS`] distinct cells.
/// It knows nothing about piece shapes; any cell pattern is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Placement {
    cells: ArrayVec<Cell, MAX_PLACEMENT_CELLS>,
}

impl Placement {
    /// Builds a placement from its cells.
    ///
    /// Fails if there are no cells, more than [`MAX_PLACEMENT_CELLS`] cells,
    /// or the same cell twice.
    pub fn new<I>(cells: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut collected: ArrayVec<Cell, MAX_PLACEMENT_CELLS> = ArrayVec::new();
        for cell in cells {
            if collected.contains(&cell) {
                return Err(PlacementError::DuplicateCell {
                    x: cell.x,
                    y: cell.y,
                });
            }
            collected
                .try_push(cell)
                .map_err(|_| PlacementError::TooManyCells)?;
        }
        if collected.is_empty() {
            return Err(PlacementError::Empty);
        }
        Ok(Self { cells: collected })
    }

    /// A horizontal run of `len` cells starting at `(x, y)`.
    pub fn horizontal(x: i32, y: i32, len: u8) -> Result<Self, PlacementError> {
        Self::new((0..i32::from(len)).map(|dx| Cell::new(x + dx, y)))
    }

    /// Returns the cells in the order they were given.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the same placement `dy` rows further down.
    #[must_use]
    pub fn shifted_down(&self, dy: i32) -> Self {
        Self {
            cells: self.cells.iter().map(|cell| cell.down_by(dy)).collect(),
        }
    }

    /// Distinct rows covered by the placement, top row first.
    #[must_use]
    pub fn rows(&self) -> ArrayVec<i32, MAX_PLACEMENT_CELLS> {
        let mut rows: ArrayVec<i32, MAX_PLACEMENT_CELLS> =
            self.cells.iter().map(|cell| cell.y).collect();
        rows.sort_unstable();
        let mut distinct: ArrayVec<i32, MAX_PLACEMENT_CELLS> = ArrayVec::new();
        for y in rows {
            if distinct.last() != Some(&y) {
                distinct.push(y);
            }
        }
        distinct
    }
}

impl TryFrom<Vec<Cell>> for Placement {
    type Error = PlacementError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<Placement> for Vec<Cell> {
    fn from(placement: Placement) -> Self {
        placement.cells.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Placement::new([]), Err(PlacementError::Empty));
    }

    #[test]
    fn test_new_rejects_too_many_cells() {
        let cells = (0..5).map(|x| Cell::new(x, 0));
        assert_eq!(Placement::new(cells), Err(PlacementError::TooManyCells));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let cells = [Cell::new(1, 1), Cell::new(2, 1), Cell::new(1, 1)];
        assert_eq!(
            Placement::new(cells),
            Err(PlacementError::DuplicateCell { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_horizontal() {
        let placement = Placement::horizontal(3, 0, 4).unwrap();
        assert_eq!(
            placement.cells(),
            [
                Cell::new(3, 0),
                Cell::new(4, 0),
                Cell::new(5, 0),
                Cell::new(6, 0)
            ]
        );
        assert_eq!(placement.rows().as_slice(), [0]);
    }

    #[test]
    fn test_rows_are_distinct_and_sorted() {
        let placement = Placement::new([
            Cell::new(0, 5),
            Cell::new(1, 3),
            Cell::new(1, 4),
            Cell::new(2, 3),
        ])
        .unwrap();
        assert_eq!(placement.rows().as_slice(), [3, 4, 5]);
    }

    #[test]
    fn test_shifted_down() {
        let placement = Placement::horizontal(0, 1, 2).unwrap().shifted_down(3);
        assert_eq!(placement.cells(), [Cell::new(0, 4), Cell::new(1, 4)]);
    }

    #[test]
    fn test_serde_as_cell_list() {
        let placement = Placement::horizontal(0, 2, 2).unwrap();
        let json = serde_json::to_string(&placement).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":2},{"x":1,"y":2}]"#);

        let parsed: Placement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, placement);

        let result: Result<Placement, _> = serde_json::from_str("[]");
        assert!(result.unwrap_err().to_string().contains("no cells"));
    }
}
