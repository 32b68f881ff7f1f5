pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Failure returned by the occupancy index and the grid built on top of it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum OccupancyError {
    #[display("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[display("row {y} is outside the grid")]
    RowOutOfBounds { y: i32 },
    #[display("column {x} has no occupied cells")]
    MissingColumn { x: i32 },
    #[display("no occupied row below {y} in column {x}")]
    NoUpperBound { x: i32, y: i32 },
    #[display("row {y} has no tracked fill count")]
    MissingRow { y: i32 },
    #[display("nearest occupied cell ({x}, {y}) is outside the grid")]
    InvalidTarget { x: i32, y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("placement has no cells")]
    Empty,
    #[display("placement has more than {} cells", MAX_PLACEMENT_CELLS)]
    TooManyCells,
    #[display("placement repeats cell ({x}, {y})")]
    DuplicateCell { x: i32, y: i32 },
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum SettleError {
    #[display("cannot settle placement: {_0}")]
    Occupancy(OccupancyError),
    #[display("placement overlaps occupied cell ({x}, {y})")]
    #[from(ignore)]
    Collision { x: i32, y: i32 },
}
