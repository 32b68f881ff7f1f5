use crate::{Cell, OccupancyError, SettleError, core::occupancy_grid::OccupancyGrid};

use super::{game_stats::GameStats, placement::Placement};

/// Result of settling one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleOutcome {
    pub cleared_rows: usize,
    pub score_gained: usize,
}

/// A grid together with the statistics of the session playing on it.
///
/// `Playfield` is the settle step of the game loop: it projects placements
/// onto the stack, commits them, clears full rows and keeps score.
///
/// # Example
///
/// ```
/// use treetris_engine::{Placement, Playfield};
///
/// // 8 columns, 10 rows
/// let mut field = Playfield::new(7, 9);
///
/// field.hard_drop_and_settle(&Placement::horizontal(0, 0, 4)?)?;
/// let outcome = field.hard_drop_and_settle(&Placement::horizontal(4, 0, 4)?)?;
///
/// assert_eq!(outcome.cleared_rows, 1);
/// assert_eq!(field.stats().score(), 8);
/// assert_eq!(field.grid().total_count(), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Playfield {
    grid: OccupancyGrid,
    stats: GameStats,
}

impl Playfield {
    /// Creates an empty playfield; bounds are inclusive as in [`OccupancyGrid`].
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::from_grid(OccupancyGrid::new(width, height))
    }

    #[must_use]
    pub fn from_grid(grid: OccupancyGrid) -> Self {
        Self {
            grid,
            stats: GameStats::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns `true` if any cell of the placement is outside the grid or
    /// already occupied.
    #[must_use]
    pub fn is_colliding(&self, placement: &Placement) -> bool {
        self.check_placement(placement).is_err()
    }

    fn check_placement(&self, placement: &Placement) -> Result<(), SettleError> {
        for &Cell { x, y } in placement.cells() {
            if !self.grid.valid_location(x, y) {
                return Err(OccupancyError::OutOfBounds { x, y }.into());
            }
            if self.grid.collide(x, y) {
                return Err(SettleError::Collision { x, y });
            }
        }
        Ok(())
    }

    /// Number of rows `cell` can fall before it lands on the stack or floor.
    fn free_fall_distance(&self, cell: Cell) -> i32 {
        let landing = match self.grid.nearest_occupied_below(cell.x, cell.y) {
            Ok(below) => below.y - 1,
            Err(OccupancyError::MissingColumn { .. } | OccupancyError::NoUpperBound { .. }) => {
                self.grid.height()
            }
            Err(err) => {
                log::warn!("treating {err} as the floor");
                self.grid.height()
            }
        };
        landing.saturating_sub(cell.y)
    }

    /// Returns where the placement comes to rest if dropped straight down.
    ///
    /// Each cell asks its column for the nearest occupied row below it, and
    /// the placement falls by the smallest free distance among its cells. A
    /// placement that is already blocked is returned unchanged.
    #[must_use]
    pub fn drop_position(&self, placement: &Placement) -> Placement {
        let distance = placement
            .cells()
            .iter()
            .map(|&cell| self.free_fall_distance(cell))
            .min()
            .unwrap_or(0)
            .max(0);
        placement.shifted_down(distance)
    }

    /// Commits the placement to the grid and clears every row it completes.
    ///
    /// The grid is left untouched if any cell is out of bounds or occupied.
    /// Completed rows are cleared top row first so that the indices of the
    /// remaining rows stay valid.
    pub fn settle(&mut self, placement: &Placement) -> Result<SettleOutcome, SettleError> {
        self.check_placement(placement)?;
        for cell in placement.cells() {
            self.grid.add_occupied(cell.x, cell.y)?;
        }

        let mut cleared_rows = 0;
        for y in placement.rows() {
            if self.grid.is_row_full(y) {
                self.grid.clear_row_and_collapse(y)?;
                cleared_rows += 1;
            }
        }

        let score_gained = self
            .stats
            .complete_placement(cleared_rows, self.grid.columns());
        log::trace!(
            "settled {:?}: cleared {cleared_rows} rows, gained {score_gained}",
            placement.cells()
        );
        Ok(SettleOutcome {
            cleared_rows,
            score_gained,
        })
    }

    /// Drops the placement to its resting position and settles it there.
    pub fn hard_drop_and_settle(
        &mut self,
        placement: &Placement,
    ) -> Result<SettleOutcome, SettleError> {
        let landed = self.drop_position(placement);
        self.settle(&landed)
    }
}
