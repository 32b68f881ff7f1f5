use serde::{Deserialize, Serialize};

/// A grid coordinate: column `x`, row `y`.
///
/// Rows grow downward, so row 0 is the spawn edge and the largest row is the
/// floor. Coordinates are signed so that positions above or beside the grid
/// can be expressed and rejected by bounds checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell `dy` rows further down, saturating at the `i32` limits.
    #[must_use]
    pub const fn down_by(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
