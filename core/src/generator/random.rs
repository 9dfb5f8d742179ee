use alloc::collections::BTreeSet;
use rand::prelude::*;

use super::*;

/// Uniform sampler: every subset of `mines` tiles is equally likely.
///
/// The generator state carries over between calls, so one seed reproduces a whole sequence of
/// games.
#[derive(Clone, Debug)]
pub struct RandomMineSampler {
    rng: SmallRng,
}

impl RandomMineSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSampler for RandomMineSampler {
    fn sample(&mut self, total_tiles: CellCount, mines: CellCount) -> Result<MineLayout> {
        if mines > total_tiles {
            return Err(BoardError::MineCountMismatch {
                expected: mines,
                actual: total_tiles,
            });
        }

        // Floyd's algorithm: for each j in the last `mines` slots draw from 0..=j and fall back
        // to j itself on a collision.
        let mut chosen = BTreeSet::new();
        for j in (total_tiles - mines)..total_tiles {
            let pick = self.rng.random_range(0..=j);
            if !chosen.insert(pick) {
                chosen.insert(j);
            }
        }

        log::trace!("Sampled {} mines out of {} tiles", chosen.len(), total_tiles);
        MineLayout::from_ids(total_tiles, chosen)
    }
}
