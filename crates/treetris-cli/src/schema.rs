use serde::{Deserialize, Serialize};
use treetris_engine::{Cell, GameStats, Placement, PlacementSeed, Playfield};

/// Input of the `replay` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ReplayFile {
    pub(crate) width: u16,
    pub(crate) height: u16,
    /// Drop every placement to its resting position before settling it.
    #[serde(default)]
    pub(crate) hard_drop: bool,
    pub(crate) placements: Vec<Placement>,
}

/// Final state of a run, written as JSON by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RunSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) seed: Option<PlacementSeed>,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) stats: GameStats,
    pub(crate) topped_out: bool,
    /// Occupied cells, sorted by row then column.
    pub(crate) occupied: Vec<Cell>,
    pub(crate) board: Vec<String>,
}

impl RunSummary {
    pub(crate) fn new(seed: Option<PlacementSeed>, field: &Playfield, topped_out: bool) -> Self {
        let grid = field.grid();
        let mut occupied: Vec<_> = grid.all_coordinates().collect();
        occupied.sort_unstable_by_key(|cell| (cell.y, cell.x));
        Self {
            seed,
            width: grid.width(),
            height: grid.height(),
            stats: field.stats().clone(),
            topped_out,
            occupied,
            board: grid.to_ascii_rows(),
        }
    }
}
