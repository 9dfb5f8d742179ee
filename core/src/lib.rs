#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

/// The set of tile ids carrying mines, rebuilt on every setup and reshuffle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: BTreeSet<TileId>,
}

impl MineLayout {
    /// Builds a layout, rejecting ids outside `0..total_tiles` and duplicates.
    pub fn from_ids(
        total_tiles: CellCount,
        ids: impl IntoIterator<Item = TileId>,
    ) -> Result<Self> {
        let mut mines = BTreeSet::new();
        for id in ids {
            if id >= total_tiles || !mines.insert(id) {
                return Err(BoardError::InvalidMineLayout { id });
            }
        }
        Ok(Self { mines })
    }

    pub fn len(&self) -> CellCount {
        self.mines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.mines.contains(&id)
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.mines.iter().copied()
    }
}

/// Final result of a game, reported once so the caller can record it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// What a single [`TileAction`] did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Guarded no-op: frozen board or a status that disallows the action.
    NoChange,
    /// The target did not resolve to a tile.
    InvalidTarget,
    Pressed,
    Released,
    /// Flag cycle advanced to the given status.
    Marked(TileStatus),
    /// Safe reveal, `count` tiles changed to checked including the clicked one.
    Revealed { count: CellCount },
    HitMine,
    Won,
}

impl ActionOutcome {
    /// Whether the caller has to redraw anything.
    pub const fn has_update(self) -> bool {
        use ActionOutcome::*;
        match self {
            NoChange => false,
            InvalidTarget => false,
            Pressed => true,
            Released => true,
            Marked(_) => true,
            Revealed { .. } => true,
            HitMine => true,
            Won => true,
        }
    }

    /// Set only by the action that ended the game.
    pub const fn game_outcome(self) -> Option<GameOutcome> {
        match self {
            Self::HitMine => Some(GameOutcome::Lost),
            Self::Won => Some(GameOutcome::Won),
            _ => None,
        }
    }
}
