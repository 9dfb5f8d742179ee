use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine placements for [`Board::setup`] and [`Board::reset_mines`].
pub trait MineSampler {
    /// Picks `mines` distinct tile ids out of `0..total_tiles`.
    fn sample(&mut self, total_tiles: CellCount, mines: CellCount) -> Result<MineLayout>;
}
