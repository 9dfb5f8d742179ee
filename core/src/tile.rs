use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a tile.
///
/// Marks cycle `Unchecked -> Flagged -> Question -> Unchecked`; `Checked` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileStatus {
    Unchecked,
    Checked,
    Flagged,
    Question,
}

impl TileStatus {
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Next status in the flag cycle, `None` once the tile has been revealed.
    pub const fn next_mark(self) -> Option<Self> {
        use TileStatus::*;
        match self {
            Unchecked => Some(Flagged),
            Flagged => Some(Question),
            Question => Some(Unchecked),
            Checked => None,
        }
    }
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Unchecked
    }
}

/// Commands accepted by [`Board::perform_action`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAction {
    /// Pointer down over a tile, purely visual.
    Press(TileRef),
    /// Pointer up anywhere, clears every pressed tile.
    Release,
    /// Reveal a tile.
    Click(TileRef),
    /// Advance the flag cycle of a tile.
    Flag(TileRef),
}

impl TileAction {
    pub const fn target(self) -> Option<TileRef> {
        match self {
            Self::Press(target) | Self::Click(target) | Self::Flag(target) => Some(target),
            Self::Release => None,
        }
    }
}

/// One cell of the grid. The board owns every tile and hands out shared references only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) row: Coord,
    pub(crate) col: Coord,
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mine_count: u8,
    pub(crate) status: TileStatus,
    pub(crate) is_pressed: bool,
}

impl Tile {
    pub(crate) const fn new(id: TileId, row: Coord, col: Coord) -> Self {
        Self {
            id,
            row,
            col,
            is_mine: false,
            adjacent_mine_count: 0,
            status: TileStatus::Unchecked,
            is_pressed: false,
        }
    }

    /// Clears everything but the position.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.id, self.row, self.col);
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Only meaningful to show once the game is over.
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Not maintained for mine tiles.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub const fn status(&self) -> TileStatus {
        self.status
    }

    pub const fn is_pressed(&self) -> bool {
        self.is_pressed
    }
}
