#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Shape of a game: board size as `(rows, cols)` and how many mines it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Both dimensions must be positive and at least one cell must stay free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 || mines >= area(size) {
            return Err(GameError::InvalidConfiguration { size, mines });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Preset board shapes offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((10, 8), 10),
            Self::Medium => GameConfig::new_unchecked((18, 14), 40),
            Self::Hard => GameConfig::new_unchecked((24, 20), 99),
        }
    }
}

/// Where the mines are, independent of anything the player has done.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutRepr")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineLayoutRepr {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutRepr> for MineLayout {
    type Error = GameError;

    fn try_from(repr: MineLayoutRepr) -> Result<Self> {
        let (rows, cols) = repr.mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = Self::from_mine_mask(repr.mine_mask);
        if layout.mine_count != repr.mine_count {
            return Err(GameError::InconsistentBoard);
        }
        GameConfig::new(layout.size(), layout.mine_count)?;
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly the given coordinates, duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        // only the dimensions are checked here, the mine count is checked once deduplicated
        GameConfig::new(size, 0)?;

        let mut mine_mask: Array2<bool> = Array2::default(size.nd());
        for &coords in mine_coords {
            if !coords.within(size) {
                return Err(GameError::OutOfBounds { coords });
            }
            mine_mask[coords.nd()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        GameConfig::new(size, layout.mine_count)?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Mine positions in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Content of every cell, mines plus precomputed adjacency counts.
    pub fn contents(&self) -> Array2<CellContent> {
        let size = self.size();
        Array2::from_shape_fn(size.nd(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if self[coords] {
                CellContent::Mine
            } else {
                CellContent::AdjacentCount(self.adjacent_mine_count(coords))
            }
        })
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.nd()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(
            GameConfig::new((0, 5), 0),
            Err(GameError::InvalidConfiguration {
                size: (0, 5),
                mines: 0
            })
        );
        assert!(GameConfig::new((5, 0), 0).is_err());
    }

    #[test]
    fn config_requires_a_free_cell() {
        assert!(GameConfig::new((2, 2), 4).is_err());
        assert!(GameConfig::new((2, 2), 9).is_err());
        assert_eq!(GameConfig::new((2, 2), 3).unwrap().safe_cells(), 1);
    }

    #[test]
    fn config_allows_no_mines() {
        let config = GameConfig::new((3, 3), 0).unwrap();

        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.safe_cells(), 9);
    }

    #[test]
    fn presets_match_expected_shapes() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new((10, 8), 10).unwrap());
        assert_eq!(Difficulty::Medium.config(), GameConfig::new((18, 14), 40).unwrap());
        assert_eq!(Difficulty::Hard.config(), GameConfig::new((24, 20), 99).unwrap());
        assert_eq!(GameConfig::from(Difficulty::default()), Difficulty::Easy.config());
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 1);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds { coords: (2, 0) })
        );
    }

    #[test]
    fn layout_rejects_full_board_and_dedups() {
        let all = [(0, 0), (0, 1)];
        assert!(MineLayout::from_mine_coords((1, 2), &all).is_err());

        let layout = MineLayout::from_mine_coords((1, 2), &[(0, 1), (0, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
    }

    #[test]
    fn contents_mark_mines_and_counts() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let contents = layout.contents();

        assert_eq!(contents[[0, 0]], CellContent::Mine);
        assert_eq!(contents[[0, 1]], CellContent::AdjacentCount(1));
        assert_eq!(contents[[1, 0]], CellContent::AdjacentCount(1));
        assert_eq!(contents[[1, 1]], CellContent::AdjacentCount(1));
    }

    #[test]
    fn layout_json_with_wrong_mine_count_is_rejected() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut json = serde_json::to_value(&layout).unwrap();
        assert_eq!(
            serde_json::from_value::<MineLayout>(json.clone()).unwrap(),
            layout
        );

        json["mine_count"] = 2.into();
        assert!(serde_json::from_value::<MineLayout>(json.clone()).is_err());

        json["mine_count"] = 4.into();
        json["mine_mask"]["data"] = serde_json::Value::from(alloc::vec![true; 4]);
        assert!(serde_json::from_value::<MineLayout>(json).is_err());
    }
}
