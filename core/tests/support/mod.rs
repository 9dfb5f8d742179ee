//! Independent reference implementations used to cross-check the engine.

#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};
use std::env;

use proptest::prelude::*;
use sweeper_core::{Board, BoardConfig, Coord, MineRatio, MineSampler, Tile, TileRef, TileStatus};

/// Cases default low for CI; override with `PROPTEST_CASES=500 cargo test`.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// `(width, height, mines, seed)` inside the default ratio band.
pub fn board_params() -> impl Strategy<Value = (Coord, Coord, usize, u64)> {
    (2 as Coord..=12, 1 as Coord..=12).prop_flat_map(|(width, height)| {
        let total = usize::from(width) * usize::from(height);
        let (min, max) = MineRatio::default().mine_bounds(total);
        (Just(width), Just(height), min..=max, any::<u64>())
    })
}

pub fn seeded_board(width: Coord, height: Coord, mines: usize, seed: u64) -> Board {
    let config = BoardConfig::new(width, height, mines).expect("params are in band");
    Board::with_seed(config, seed).expect("board builds")
}

pub fn tile<S>(board: &Board<S>, id: usize) -> &Tile {
    board.tile(TileRef::ById(id)).expect("id in range")
}

pub fn statuses<S>(board: &Board<S>) -> Vec<TileStatus> {
    board.tiles().map(Tile::status).collect()
}

/// Neighbour ids by plain offset arithmetic, no shared code with the engine.
pub fn brute_neighbors(width: Coord, height: Coord, id: usize) -> Vec<usize> {
    let (w, h) = (i64::from(width), i64::from(height));
    let (row, col) = (id as i64 / w, id as i64 % w);
    let mut out = Vec::new();
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let (r, c) = (row + d_row, col + d_col);
            if (0..h).contains(&r) && (0..w).contains(&c) {
                out.push((r * w + c) as usize);
            }
        }
    }
    out
}

pub fn brute_adjacent_mines<S>(board: &Board<S>, id: usize) -> usize {
    brute_neighbors(board.width(), board.height(), id)
        .into_iter()
        .filter(|&n| tile(board, n).is_mine())
        .count()
}

/// Tiles a click on the safe, unchecked `origin` should reveal on a fresh board.
pub fn expected_reveal<S>(board: &Board<S>, origin: usize) -> BTreeSet<usize> {
    let mut revealed = BTreeSet::from([origin]);
    if brute_adjacent_mines(board, origin) != 0 {
        return revealed;
    }

    let mut queue = VecDeque::from([origin]);
    while let Some(id) = queue.pop_front() {
        for n in brute_neighbors(board.width(), board.height(), id) {
            if tile(board, n).is_mine() || !revealed.insert(n) {
                continue;
            }
            if brute_adjacent_mines(board, n) == 0 {
                queue.push_back(n);
            }
        }
    }
    revealed
}

/// Sampler that always fails, to drive error paths.
pub struct BrokenSampler;

impl MineSampler for BrokenSampler {
    fn sample(
        &mut self,
        _total_tiles: usize,
        mines: usize,
    ) -> sweeper_core::Result<sweeper_core::MineLayout> {
        Err(sweeper_core::BoardError::MineCountMismatch {
            expected: mines,
            actual: 0,
        })
    }
}
