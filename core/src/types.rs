use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u16;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = usize;

/// Stable row-major tile index, `row * width + col`.
pub type TileId = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Target of a tile action, resolved once into a canonical [`TileId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileRef {
    ById(TileId),
    ByRowCol(Coord, Coord),
}

impl From<TileId> for TileRef {
    fn from(id: TileId) -> Self {
        Self::ById(id)
    }
}

impl From<Coord2> for TileRef {
    fn from((row, col): Coord2) -> Self {
        Self::ByRowCol(row, col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

/// Ids of the tiles surrounding `center` on a row-major board of `size = (rows, cols)`,
/// in ascending order. Edge and corner tiles get fewer than eight.
pub fn neighbor_ids(center: Coord2, size: Coord2) -> impl Iterator<Item = TileId> {
    let (row, col) = (usize::from(center.0), usize::from(center.1));
    let (rows, cols) = (usize::from(size.0), usize::from(size.1));

    let row_span = row.saturating_sub(1)..(row + 2).min(rows);
    let col_span = col.saturating_sub(1)..(col + 2).min(cols);

    row_span.flat_map(move |r| {
        col_span
            .clone()
            .filter(move |&c| (r, c) != (row, col))
            .map(move |c| r * cols + c)
    })
}
