use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A game from start to finish, owned by a single session and mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_safe: CellCount,
    flagged: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    seed: Option<u64>,
}

impl Board {
    /// Random board for `config`, mine placement fully determined by `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::seeded(config, seed))
    }

    /// Board with mines placed by an arbitrary generator.
    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let layout = generator.generate(config);
        // the layout has to match what was asked for, in shape and mine count
        if layout.game_config() != config {
            return Err(GameError::InvalidConfiguration {
                size: layout.size(),
                mines: layout.mine_count(),
            });
        }
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        Self {
            config: layout.game_config(),
            cells: layout.contents().mapv(Cell::hidden),
            revealed_safe: 0,
            flagged: 0,
            state: GameState::default(),
            triggered_mine: None,
            seed: None,
        }
    }

    fn seeded(config: GameConfig, seed: u64) -> Self {
        let layout = RandomMinefieldGenerator::new(seed).generate(config);
        let mut board = Self::from_layout(layout);
        board.seed = Some(seed);
        board
    }

    /// Starts over with the same size and mine count but a fresh layout drawn from `seed`.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("Resetting {:?} board with seed {}", self.config.size, seed);
        *self = Self::seeded(self.config, seed);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Seed the layout was generated from, `None` for explicit layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged as isize)
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.within(self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// All cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.nd()];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        log::trace!("Flag at {:?} set to {}", coords, cell.flagged);
        Ok(MarkOutcome::Changed)
    }

    /// Reveals a cell, flood-filling from it when it has no adjacent mines.
    ///
    /// A flag on the cell is cleared. Hitting a mine loses the game and uncovers every mine;
    /// uncovering the last safe cell wins it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() || self[coords].revealed {
            return Ok(RevealOutcome::NoChange);
        }

        let content = self.uncover(coords);
        log::debug!("Reveal at {:?}: {:?}", coords, content);

        match content {
            CellContent::Mine => {
                self.triggered_mine = Some(coords);
                self.end_game(false);
                return Ok(RevealOutcome::HitMine);
            }
            CellContent::AdjacentCount(0) => self.flood_fill(coords),
            CellContent::AdjacentCount(_) => {}
        }

        if self.revealed_safe == self.config.safe_cells() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Marks a hidden cell revealed, clearing its flag and keeping the counters current.
    fn uncover(&mut self, coords: Coord2) -> CellContent {
        let cell = &mut self.cells[coords.nd()];
        cell.revealed = true;
        if cell.flagged {
            cell.flagged = false;
            self.flagged -= 1;
        }
        if !cell.is_mine() {
            self.revealed_safe += 1;
        }
        cell.content
    }

    /// Cells are marked revealed as they are queued, so each is visited at most once.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.cells.iter_neighbors(visit_coords) {
                let cell = self.cells[pos.nd()];
                if cell.revealed || cell.is_mine() {
                    continue;
                }

                let content = self.uncover(pos);
                log::trace!("Flood opened cell at {:?}: {:?}", pos, content);
                if content == CellContent::AdjacentCount(0) {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    fn end_game(&mut self, won: bool) {
        if won {
            self.state = GameState::Won;
            log::debug!("Game won after revealing {} cells", self.revealed_safe);
        } else {
            self.state = GameState::Lost;
            self.reveal_mines();
            log::debug!("Game lost at {:?}", self.triggered_mine);
        }
    }

    /// Uncovers every mine, safe cells and flags are left alone.
    fn reveal_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.revealed = true;
        }
    }
}

/// Untrusted wire form of a [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct BoardRepr {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_safe: CellCount,
    flagged: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    seed: Option<u64>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let config = GameConfig::new(repr.config.size, repr.config.mines)?;
        let (rows, cols) = config.size;
        if repr.cells.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let board = Self {
            config,
            cells: repr.cells,
            revealed_safe: repr.revealed_safe,
            flagged: repr.flagged,
            state: repr.state,
            triggered_mine: repr.triggered_mine,
            seed: repr.seed,
        };
        if board.is_consistent() {
            Ok(board)
        } else {
            Err(GameError::InconsistentBoard)
        }
    }
}

impl Board {
    fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| pred(cell)).count() as CellCount
    }

    /// Checks everything `reveal` and `toggle_flag` rely on without re-checking.
    fn is_consistent(&self) -> bool {
        let layout = MineLayout::from_mine_mask(self.cells.map(Cell::is_mine));
        let contents_match = layout
            .contents()
            .iter()
            .zip(self.cells.iter())
            .all(|(&content, cell)| content == cell.content);
        if layout.mine_count() != self.config.mines || !contents_match {
            return false;
        }

        let counters_match = self.revealed_safe
            == self.count_cells(|cell| cell.revealed && !cell.is_mine())
            && self.flagged == self.count_cells(|cell| cell.flagged)
            && self.count_cells(|cell| cell.revealed && cell.flagged && !cell.is_mine()) == 0;
        if !counters_match {
            return false;
        }

        let all_safe_revealed = self.revealed_safe == self.config.safe_cells();
        let mines_revealed = self.count_cells(|cell| cell.revealed && cell.is_mine());
        match self.state {
            GameState::InProgress => {
                !all_safe_revealed && mines_revealed == 0 && self.triggered_mine.is_none()
            }
            GameState::Won => {
                all_safe_revealed && mines_revealed == 0 && self.triggered_mine.is_none()
            }
            GameState::Lost => {
                !all_safe_revealed
                    && mines_revealed == self.config.mines
                    && self.triggered_mine.is_some_and(|coords| {
                        coords.within(self.config.size) && self[coords].is_mine()
                    })
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.nd()]
    }
}
