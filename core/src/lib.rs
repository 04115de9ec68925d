#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The only board a session plays: 9x9 with 10 mines.
    pub const CLASSIC: Self = Self::new_unchecked((9, 9), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// At least one cell must stay safe, so `mines < rows * cols`.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        check_mine_count(self.mines, self.total_cells())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

pub(crate) fn check_mine_count(requested: CellCount, capacity: CellCount) -> Result<()> {
    if requested < capacity {
        Ok(())
    } else {
        Err(GameError::TooManyMines {
            requested,
            capacity,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Out of bounds, already revealed or flagged.
    Blocked,
    MineHit,
    /// Number of cells newly opened, the clicked one included.
    Revealed(CellCount),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    pub const fn opened(self) -> CellCount {
        match self {
            Self::Revealed(count) => count,
            Self::Blocked | Self::MineHit => 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Flag state after the toggle.
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Derived from the board, never stored.
///
/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_valid() {
        assert_eq!(GameConfig::CLASSIC.validate(), Ok(()));
        assert_eq!(GameConfig::CLASSIC.safe_cell_count(), 71);
        assert_eq!(GameConfig::default(), GameConfig::CLASSIC);
    }

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::TooManyMines {
                requested: 9,
                capacity: 9
            })
        );
        assert!(GameConfig::new((3, 3), 8).is_ok());
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(GameConfig::new((0, 9), 0), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new((9, 0), 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn outcome_helpers() {
        assert!(RevealOutcome::MineHit.has_update());
        assert!(!RevealOutcome::Blocked.has_update());
        assert_eq!(RevealOutcome::Revealed(5).opened(), 5);
        assert_eq!(RevealOutcome::MineHit.opened(), 0);

        assert!(MarkOutcome::Flagged.is_flagged());
        assert!(!MarkOutcome::Unflagged.is_flagged());
        assert!(MarkOutcome::Unflagged.has_update());
        assert!(!MarkOutcome::NoChange.has_update());

        assert!(GameOutcome::Lost.is_finished());
        assert!(!GameOutcome::InProgress.is_finished());
    }
}
