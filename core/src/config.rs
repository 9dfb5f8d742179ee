use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_MIN_MINE_RATIO: f64 = 0.01;
/// Highest share of tiles that may carry mines.
pub const DEFAULT_MAX_MINE_RATIO: f64 = 0.8;
pub const DEFAULT_MAX_TILES: CellCount = 1 << 16;

/// Allowed band for `mines / (width * height)`, both ends inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineRatio {
    pub min: f64,
    pub max: f64,
}

impl MineRatio {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<()> {
        // written so that NaN fails every comparison
        if 0.0 <= self.min && self.min <= self.max && self.max <= 1.0 {
            Ok(())
        } else {
            Err(BoardError::InvalidMineRatio)
        }
    }

    /// Whether `mines / total_tiles` lies inside the band.
    pub fn admits(&self, mines: CellCount, total_tiles: CellCount) -> bool {
        let share = mines as f64 / total_tiles as f64;
        self.min <= share && share <= self.max
    }

    /// Inclusive integer mine-count bounds for a board of `total_tiles`.
    ///
    /// The products `min * total` and `max * total` only seed the search; each bound is then
    /// moved until it agrees with the share comparison in [`MineRatio::admits`], so a count that
    /// sits exactly on a band edge is kept even when the product rounds past it.
    pub fn mine_bounds(&self, total_tiles: CellCount) -> (CellCount, CellCount) {
        let total = total_tiles as f64;
        // both closures are false for NaN, which keeps every loop bounded
        let above_min = |mines: CellCount| mines as f64 / total >= self.min;
        let below_max = |mines: CellCount| mines as f64 / total <= self.max;

        let mut min_mines = ((self.min * total) as CellCount).min(total_tiles);
        while min_mines > 0 && above_min(min_mines - 1) {
            min_mines -= 1;
        }
        while min_mines <= total_tiles && !above_min(min_mines) {
            min_mines += 1;
        }

        let mut max_mines = ((self.max * total) as CellCount).min(total_tiles);
        while max_mines < total_tiles && below_max(max_mines + 1) {
            max_mines += 1;
        }
        while max_mines > 0 && !below_max(max_mines) {
            max_mines -= 1;
        }

        (min_mines, max_mines)
    }
}

impl Default for MineRatio {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MINE_RATIO, DEFAULT_MAX_MINE_RATIO)
    }
}

/// Dimensions and mine count of a board, together with the limits they are checked against.
///
/// Every constructor that returns `Ok` yields a config that satisfies the ratio band. Counts
/// outside the band are rejected unless the caller opts into [`BoardConfig::clamped`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub ratio: MineRatio,
    pub max_tiles: CellCount,
}

impl BoardConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::with_limits(width, height, mines, MineRatio::default(), DEFAULT_MAX_TILES)
    }

    pub fn with_limits(
        width: Coord,
        height: Coord,
        mines: CellCount,
        ratio: MineRatio,
        max_tiles: CellCount,
    ) -> Result<Self> {
        let config = Self {
            width,
            height,
            mines,
            ratio,
            max_tiles,
        };
        config.validate()?;
        Ok(config)
    }

    /// Like [`BoardConfig::with_limits`] but moves an out-of-band mine count to the nearest
    /// allowed value instead of failing. Dimension and ratio errors are still reported.
    pub fn clamped(
        width: Coord,
        height: Coord,
        mines: CellCount,
        ratio: MineRatio,
        max_tiles: CellCount,
    ) -> Result<Self> {
        let mut config = Self {
            width,
            height,
            mines,
            ratio,
            max_tiles,
        };
        config.validate_shape()?;

        let (min_mines, max_mines) = ratio.mine_bounds(config.total_tiles());
        if min_mines > max_mines {
            return Err(config.out_of_range());
        }
        config.mines = mines.clamp(min_mines, max_mines);
        if config.mines != mines {
            log::warn!(
                "Mine count clamped from {} to {} for a {}x{} board",
                mines,
                config.mines,
                width,
                height
            );
        }
        Ok(config)
    }

    pub const fn easy() -> Self {
        Self::preset(15, 10, 20)
    }

    pub const fn medium() -> Self {
        Self::preset(25, 15, 50)
    }

    pub const fn hard() -> Self {
        Self::preset(40, 25, 100)
    }

    const fn preset(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            ratio: MineRatio::new(DEFAULT_MIN_MINE_RATIO, DEFAULT_MAX_MINE_RATIO),
            max_tiles: DEFAULT_MAX_TILES,
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_shape()?;

        if self.ratio.admits(self.mines, self.total_tiles()) {
            Ok(())
        } else {
            Err(self.out_of_range())
        }
    }

    fn validate_shape(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let tiles = self.total_tiles();
        if tiles > self.max_tiles {
            return Err(BoardError::TooManyTiles {
                tiles,
                max: self.max_tiles,
            });
        }
        self.ratio.validate()
    }

    fn out_of_range(&self) -> BoardError {
        let (min, max) = self.ratio.mine_bounds(self.total_tiles());
        BoardError::MineCountOutOfRange {
            mines: self.mines,
            tiles: self.total_tiles(),
            min,
            max,
        }
    }
}
