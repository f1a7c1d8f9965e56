use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines on a board of size {size:?}")]
    InvalidConfiguration { size: Coord2, mines: CellCount },
    #[error("Coordinates {coords:?} are outside the board")]
    OutOfBounds { coords: Coord2 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board contents, counters or state contradict each other")]
    InconsistentBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
