use alloc::vec::Vec;

use super::*;

/// Places mines on a caller-chosen set of tiles, every time it is asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMines {
    ids: Vec<TileId>,
}

impl FixedMines {
    pub fn new(ids: impl IntoIterator<Item = TileId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl MineSampler for FixedMines {
    fn sample(&mut self, total_tiles: CellCount, mines: CellCount) -> Result<MineLayout> {
        let layout = MineLayout::from_ids(total_tiles, self.ids.iter().copied())?;
        if layout.len() != mines {
            return Err(BoardError::MineCountMismatch {
                expected: mines,
                actual: layout.len(),
            });
        }
        Ok(layout)
    }
}
