use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, requested {requested} for a board of {capacity} cells")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Generator produced {actual} distinct mines, expected {expected}")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
