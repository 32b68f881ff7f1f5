pub use self::{cell::*, column_index::*, occupancy_grid::*, ordered_row_set::*};

pub(crate) mod cell;
pub(crate) mod column_index;
pub(crate) mod occupancy_grid;
pub(crate) mod ordered_row_set;
