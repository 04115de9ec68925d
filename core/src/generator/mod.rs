use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine positions for [`Board::place_mines`].
///
/// Generators only choose positions; the board checks bounds, duplicates and the
/// resulting count before planting anything.
pub trait MineGenerator {
    fn mine_positions(self, size: Coord2, count: CellCount) -> Vec<Coord2>;
}
