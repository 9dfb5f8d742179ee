use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// In-bounds neighbour ids of one tile, at most eight.
pub type NeighborIds = SmallVec<[TileId; 8]>;

/// Rules engine for a single minefield.
///
/// Owns the tiles, the mine layout and the neighbour map, and applies [`TileAction`]s to
/// them. Once a mine is revealed (`valid == false`) or every safe tile is revealed
/// (`won == true`) the board is frozen until the next [`Board::setup`].
#[derive(Clone, Debug)]
pub struct Board<S = RandomMineSampler> {
    config: BoardConfig,
    tiles: Array2<Tile>,
    mines: MineLayout,
    /// Only safe tiles have entries, mines are never flood-fill sources.
    neighbors: HashMap<TileId, NeighborIds>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    valid: bool,
    won: bool,
    pressed: Option<TileId>,
    flag_only: bool,
    sampler: S,
}

impl Board<RandomMineSampler> {
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMineSampler::new(seed))
    }
}

impl<S: MineSampler> Board<S> {
    pub fn new(config: BoardConfig, sampler: S) -> Result<Self> {
        config.validate()?;
        let mut board = Self {
            config,
            tiles: create_tiles(&config),
            mines: MineLayout::default(),
            neighbors: HashMap::new(),
            revealed_count: 0,
            flagged_count: 0,
            valid: true,
            won: false,
            pressed: None,
            flag_only: false,
            sampler,
        };
        board.setup()?;
        Ok(board)
    }

    /// Starts a new game: fresh tiles, fresh mine placement, cleared state.
    pub fn setup(&mut self) -> Result<()> {
        self.config.validate()?;
        let layout = self.sample_mines()?;

        self.tiles = create_tiles(&self.config);
        self.apply_layout(layout);
        log::debug!(
            "New {}x{} board with {} mines",
            self.config.width,
            self.config.height,
            self.mines.len()
        );
        Ok(())
    }

    /// Replaces the dimensions and mine count, then starts a new game.
    ///
    /// On error the board keeps its previous config and state.
    pub fn resize(&mut self, config: BoardConfig) -> Result<()> {
        config.validate()?;
        let previous = core::mem::replace(&mut self.config, config);
        if let Err(err) = self.setup() {
            self.config = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Reshuffles mines over the existing tiles and resets every tile to unchecked.
    pub fn reset_mines(&mut self) -> Result<()> {
        let layout = self.sample_mines()?;

        for tile in self.tiles.iter_mut() {
            tile.reset();
        }
        self.apply_layout(layout);
        log::debug!("Reshuffled {} mines", self.mines.len());
        Ok(())
    }

    fn sample_mines(&mut self) -> Result<MineLayout> {
        let total = self.config.total_tiles();
        let expected = self.config.mines;
        let layout = self.sampler.sample(total, expected)?;

        if layout.len() != expected {
            return Err(BoardError::MineCountMismatch {
                expected,
                actual: layout.len(),
            });
        }
        if let Some(id) = layout.iter().find(|&id| id >= total) {
            return Err(BoardError::InvalidMineLayout { id });
        }
        Ok(layout)
    }

    /// Expects tiles in their reset state and a layout already checked against them.
    fn apply_layout(&mut self, layout: MineLayout) {
        let width = self.config.width;
        for id in layout.iter() {
            if let Some(tile) = tile_slot(&mut self.tiles, width, id) {
                tile.is_mine = true;
            }
        }
        self.mines = layout;
        self.map_neighbors();

        self.revealed_count = 0;
        self.flagged_count = 0;
        self.valid = true;
        self.won = false;
        self.pressed = None;
    }

    fn map_neighbors(&mut self) {
        let size = self.config.size();
        let mut neighbors: HashMap<TileId, NeighborIds> = HashMap::with_capacity(self.config.safe_tile_count());

        for tile in self.tiles.iter().filter(|tile| !tile.is_mine) {
            neighbors.insert(tile.id, neighbor_ids(tile.coords(), size).collect());
        }

        for tile in self.tiles.iter_mut() {
            if let Some(ids) = neighbors.get(&tile.id) {
                tile.adjacent_mine_count =
                    ids.iter().filter(|&&id| self.mines.contains(id)).count() as u8;
            }
        }

        self.neighbors = neighbors;
    }
}

impl<S> Board<S> {
    /// Applies one action.
    ///
    /// Invalid targets and disallowed actions are reported through the outcome; only a broken
    /// engine invariant is returned as an error.
    pub fn perform_action(&mut self, action: TileAction) -> Result<ActionOutcome> {
        match action {
            TileAction::Release => Ok(self.release()),
            TileAction::Press(target) => {
                self.on_target(target, |board, id| Ok(board.press_tile(id)))
            }
            TileAction::Click(target) => self.on_target(target, |board, id| {
                if board.flag_only {
                    Ok(board.flag_tile(id))
                } else {
                    board.click_tile(id)
                }
            }),
            TileAction::Flag(target) => {
                self.on_target(target, |board, id| Ok(board.flag_tile(id)))
            }
        }
    }

    pub fn press(&mut self, target: TileRef) -> Result<ActionOutcome> {
        self.perform_action(TileAction::Press(target))
    }

    pub fn click(&mut self, target: TileRef) -> Result<ActionOutcome> {
        self.perform_action(TileAction::Click(target))
    }

    pub fn flag(&mut self, target: TileRef) -> Result<ActionOutcome> {
        self.perform_action(TileAction::Flag(target))
    }

    /// Clears the pressed tile, if any. Idempotent.
    pub fn release(&mut self) -> ActionOutcome {
        let Some(id) = self.pressed.take() else {
            return ActionOutcome::NoChange;
        };
        if let Some(tile) = tile_slot(&mut self.tiles, self.config.width, id) {
            tile.is_pressed = false;
        }
        ActionOutcome::Released
    }

    /// Guards for every targeted action: a frozen board drops the press and ignores the
    /// action, and an unresolved target is reported without touching the board.
    fn on_target(
        &mut self,
        target: TileRef,
        apply: impl FnOnce(&mut Self, TileId) -> Result<ActionOutcome>,
    ) -> Result<ActionOutcome> {
        if self.is_frozen() {
            self.release();
            return Ok(ActionOutcome::NoChange);
        }

        let Some(id) = self.resolve(target) else {
            log::debug!("No tile matches {:?}", target);
            return Ok(ActionOutcome::InvalidTarget);
        };
        apply(self, id)
    }

    fn press_tile(&mut self, id: TileId) -> ActionOutcome {
        match self.tile_by_id(id).map(Tile::status) {
            Some(TileStatus::Unchecked) => {}
            Some(_) => return ActionOutcome::NoChange,
            None => return ActionOutcome::InvalidTarget,
        }
        if self.pressed == Some(id) {
            return ActionOutcome::NoChange;
        }

        self.release();
        if let Some(tile) = tile_slot(&mut self.tiles, self.config.width, id) {
            tile.is_pressed = true;
            self.pressed = Some(id);
        }
        ActionOutcome::Pressed
    }

    fn flag_tile(&mut self, id: TileId) -> ActionOutcome {
        let Some(tile) = tile_slot(&mut self.tiles, self.config.width, id) else {
            return ActionOutcome::InvalidTarget;
        };
        let Some(next) = tile.status.next_mark() else {
            return ActionOutcome::NoChange;
        };

        match (tile.status, next) {
            (_, TileStatus::Flagged) => self.flagged_count += 1,
            (TileStatus::Flagged, _) => self.flagged_count -= 1,
            _ => {}
        }
        tile.status = next;
        ActionOutcome::Marked(next)
    }

    fn click_tile(&mut self, id: TileId) -> Result<ActionOutcome> {
        match self.tile_by_id(id).map(Tile::status) {
            Some(TileStatus::Unchecked) => {}
            Some(_) => return Ok(ActionOutcome::NoChange),
            None => return Ok(ActionOutcome::InvalidTarget),
        }

        self.release();
        let tile = self.tile_mut(id)?;
        tile.status = TileStatus::Checked;
        let (is_mine, adjacent_mines) = (tile.is_mine, tile.adjacent_mine_count);

        if is_mine {
            self.valid = false;
            log::debug!("Mine revealed at tile {}", id);
            debug_assert!(!self.scan_validity());
            return Ok(ActionOutcome::HitMine);
        }

        self.revealed_count += 1;
        let mut count = 1;
        if adjacent_mines == 0 {
            count += self.flood_fill(id)?;
        }
        debug_assert!(self.scan_validity());

        if self.revealed_count == self.config.safe_tile_count() {
            self.won = true;
            log::debug!("All {} safe tiles revealed", self.revealed_count);
            Ok(ActionOutcome::Won)
        } else {
            Ok(ActionOutcome::Revealed { count })
        }
    }

    /// Reveals the connected zero-count region around `origin` plus its numbered rim.
    ///
    /// Works level by level: the frontier holds zero-count tiles whose neighbours have not
    /// been examined yet. A tile is revealed at most once, so the number of levels is bounded
    /// by the tile count. Returns how many tiles were revealed, `origin` excluded.
    fn flood_fill(&mut self, origin: TileId) -> Result<CellCount> {
        let width = self.config.width;
        let limit = self.config.total_tiles();
        let mut frontier = vec![origin];
        let mut levels = 0;
        let mut revealed = 0;

        log::trace!("Starting flood fill from tile {}", origin);
        while !frontier.is_empty() {
            levels += 1;
            if levels > limit {
                log::error!("Flood fill from tile {} did not settle after {} levels", origin, limit);
                return Err(BoardError::FloodFillOverrun { limit });
            }

            let mut next = Vec::new();
            for &id in &frontier {
                let neighbors = self
                    .neighbors
                    .get(&id)
                    .ok_or(BoardError::DanglingNeighbor { id })?;

                for &neighbor in neighbors {
                    let tile = tile_slot(&mut self.tiles, width, neighbor)
                        .ok_or(BoardError::DanglingNeighbor { id: neighbor })?;
                    if tile.is_mine || tile.status.is_checked() {
                        continue;
                    }

                    if tile.status == TileStatus::Flagged {
                        self.flagged_count -= 1;
                    }
                    tile.status = TileStatus::Checked;
                    revealed += 1;
                    log::trace!(
                        "Flood revealed tile {}, adjacent mines: {}",
                        neighbor,
                        tile.adjacent_mine_count
                    );

                    if tile.adjacent_mine_count == 0 {
                        next.push(neighbor);
                    }
                }
            }
            frontier = next;
        }

        self.revealed_count += revealed;
        Ok(revealed)
    }

    /// Full scan form of the validity rule: no mine may be checked.
    fn scan_validity(&self) -> bool {
        !self
            .tiles
            .iter()
            .any(|tile| tile.is_mine && tile.status.is_checked())
    }

    pub fn resolve(&self, target: TileRef) -> Option<TileId> {
        match target {
            TileRef::ById(id) => (id < self.total_tiles()).then_some(id),
            TileRef::ByRowCol(row, col) => (row < self.config.height && col < self.config.width)
                .then(|| tile_id(self.config.width, (row, col))),
        }
    }

    pub fn tile(&self, target: TileRef) -> Option<&Tile> {
        self.tile_by_id(self.resolve(target)?)
    }

    /// All tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Tiles indexed by `[row, col]`.
    pub fn grid(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Neighbour ids of a safe tile; `None` for mines and unknown ids.
    pub fn neighbors(&self, id: TileId) -> Option<&[TileId]> {
        self.neighbors.get(&id).map(|ids| ids.as_slice())
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mines
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn total_tiles(&self) -> CellCount {
        self.config.total_tiles()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags; negative when the player has over-flagged.
    pub fn remaining_mines(&self) -> isize {
        (self.mines.len() as isize) - (self.flagged_count as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_frozen(&self) -> bool {
        !self.valid || self.won
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

    pub fn pressed_tile(&self) -> Option<TileId> {
        self.pressed
    }

    pub fn flag_only(&self) -> bool {
        self.flag_only
    }

    /// When set, clicks advance the flag cycle instead of revealing.
    pub fn set_flag_only(&mut self, flag_only: bool) {
        self.flag_only = flag_only;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }

    fn tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(nd_index(self.config.width, id))
    }

    fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile> {
        tile_slot(&mut self.tiles, self.config.width, id).ok_or(BoardError::DanglingNeighbor { id })
    }
}

impl<S> fmt::Display for Board<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                match tile.status {
                    TileStatus::Checked if tile.is_mine => f.write_str("[X]")?,
                    TileStatus::Checked if tile.adjacent_mine_count > 0 => {
                        write!(f, "[{}]", tile.adjacent_mine_count)?
                    }
                    TileStatus::Checked => f.write_str("[ ]")?,
                    TileStatus::Flagged => f.write_str("[F]")?,
                    TileStatus::Question => f.write_str("[?]")?,
                    TileStatus::Unchecked => f.write_str("[-]")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn create_tiles(config: &BoardConfig) -> Array2<Tile> {
    let width = config.width;
    Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
        let coords = (row as Coord, col as Coord);
        Tile::new(tile_id(width, coords), coords.0, coords.1)
    })
}

const fn tile_id(width: Coord, coords: Coord2) -> TileId {
    coords.0 as TileId * width as TileId + coords.1 as TileId
}

/// Ids past the last row map to an out-of-bounds index, which `Array2::get` rejects.
const fn nd_index(width: Coord, id: TileId) -> [usize; 2] {
    let width = width as usize;
    [id / width, id % width]
}

fn tile_slot(tiles: &mut Array2<Tile>, width: Coord, id: TileId) -> Option<&mut Tile> {
    tiles.get_mut(nd_index(width, id))
}
