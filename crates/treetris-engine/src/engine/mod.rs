//! The settle step of the game loop, built on top of the occupancy index.
//!
//! - [`Placement`] - The cells a landed piece contributes
//! - [`Playfield`] - Grid plus statistics; projects, settles and clears
//! - [`GameStats`] - Score, settled placements and cleared rows
//! - [`PlacementGenerator`] - Seeded source of spawn placements
//!
//! # Game Flow
//!
//! 1. Draw a spawn placement from [`PlacementGenerator`]
//! 2. If it collides at spawn, the session is over
//! 3. Project it with [`Playfield::drop_position`] (the shadow) and settle it
//! 4. Every row the placement completed is cleared and scored
//!
//! # Example
//!
//! ```
//! use treetris_engine::{PlacementGenerator, PlacementSeed, Playfield};
//!
//! let seed = PlacementSeed::from_bytes([7; 16]);
//! let mut generator = PlacementGenerator::with_seed(seed, 9);
//! let mut field = Playfield::new(9, 19);
//!
//! for placement in generator.by_ref().take(20) {
//!     if field.is_colliding(&placement) {
//!         break;
//!     }
//!     field.hard_drop_and_settle(&placement).unwrap();
//! }
//! assert!(field.stats().completed_placements() > 0);
//! ```

pub use self::{game_stats::*, placement::*, placement_generator::*, playfield::*};

mod game_stats;
mod placement;
mod placement_generator;
mod playfield;
