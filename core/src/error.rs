use thiserror::Error;

use crate::{CellCount, TileId};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board dimensions must be positive")]
    EmptyBoard,
    #[error("Board of {tiles} tiles exceeds the limit of {max}")]
    TooManyTiles { tiles: CellCount, max: CellCount },
    #[error("Mine ratio band must satisfy 0 <= min <= max <= 1")]
    InvalidMineRatio,
    #[error("{mines} mines on {tiles} tiles is outside the allowed range {min}..={max}")]
    MineCountOutOfRange {
        mines: CellCount,
        tiles: CellCount,
        min: CellCount,
        max: CellCount,
    },
    #[error("Mine layout references tile {id} more than once or out of range")]
    InvalidMineLayout { id: TileId },
    #[error("Expected {expected} mines but the layout holds {actual}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
    #[error("Flood fill exceeded {limit} iterations")]
    FloodFillOverrun { limit: usize },
    #[error("Neighbor map references missing tile {id}")]
    DanglingNeighbor { id: TileId },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

impl BoardError {
    /// Whether the error is a broken engine invariant rather than bad input.
    pub const fn is_internal(self) -> bool {
        matches!(
            self,
            Self::FloodFillOverrun { .. } | Self::DanglingNeighbor { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, BoardError>;
