use serde::{Deserialize, Serialize};

use super::placement::MAX_PLACEMENT_CELLS;

/// Session statistics: score, settled placements and cleared rows.
///
/// Every cleared row is worth as many points as the grid has columns, so a
/// single row on a 16-column grid scores 16.
///
/// # Example
///
/// ```
/// use treetris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(2, 10);
///
/// assert_eq!(stats.score(), 20);
/// assert_eq!(stats.total_cleared_rows(), 2);
/// assert_eq!(stats.row_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_placements: usize,
    total_cleared_rows: usize,
    row_cleared_counter: [usize; MAX_PLACEMENT_CELLS + 1],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_placements: 0,
            total_cleared_rows: 0,
            row_cleared_counter: [0; MAX_PLACEMENT_CELLS + 1],
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of placements settled into the grid.
    #[must_use]
    pub const fn completed_placements(&self) -> usize {
        self.completed_placements
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Returns a histogram of placements by the number of rows they cleared.
    ///
    /// Index `n` counts placements that cleared exactly `n` rows.
    #[must_use]
    pub const fn row_cleared_counter(&self) -> &[usize; MAX_PLACEMENT_CELLS + 1] {
        &self.row_cleared_counter
    }

    /// Records a settled placement and returns the points it earned.
    pub fn complete_placement(&mut self, cleared_rows: usize, columns: usize) -> usize {
        let gained = cleared_rows * columns;
        self.completed_placements += 1;
        self.total_cleared_rows += cleared_rows;
        if let Some(counter) = self.row_cleared_counter.get_mut(cleared_rows) {
            *counter += 1;
        }
        self.score += gained;
        gained
    }
}
