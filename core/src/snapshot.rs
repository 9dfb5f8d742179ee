use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only copy of everything a front end needs to draw a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: Coord,
    pub height: Coord,
    pub valid: bool,
    pub won: bool,
    pub mine_count: CellCount,
    pub remaining_mines: isize,
    pub pressed: Option<TileId>,
    /// Indexed by `[row, col]`.
    pub tiles: Array2<Tile>,
}

impl BoardSnapshot {
    pub fn from_board<S>(board: &Board<S>) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            valid: board.is_valid(),
            won: board.is_won(),
            mine_count: board.mine_count(),
            remaining_mines: board.remaining_mines(),
            pressed: board.pressed_tile(),
            tiles: board.grid().clone(),
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.valid {
            Some(GameOutcome::Lost)
        } else if self.won {
            Some(GameOutcome::Won)
        } else {
            None
        }
    }

    /// Checks a snapshot that came from outside, e.g. after deserialisation.
    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.height), usize::from(self.width));
        if self.tiles.dim() != expected {
            return Err(BoardError::InvalidBoardShape);
        }

        let width = usize::from(self.width);
        let misplaced = self.tiles.indexed_iter().any(|((row, col), tile)| {
            tile.id != row * width + col
                || usize::from(tile.row) != row
                || usize::from(tile.col) != col
        });
        if misplaced {
            return Err(BoardError::InvalidBoardShape);
        }

        if let Some(pressed) = self.pressed {
            if pressed >= self.tiles.len() {
                return Err(BoardError::InvalidBoardShape);
            }
        }

        Ok(())
    }
}
