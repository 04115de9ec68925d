use serde::{Deserialize, Serialize};

/// State of a single grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub has_mine: bool,
    pub flagged: bool,
    /// Mines in the Moore neighborhood, always 0 on mined cells.
    pub adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.revealed
    }

    /// Whether a reveal at this cell would do anything.
    pub const fn can_reveal(self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Revealed and safe, the cells that count towards a win.
    pub const fn is_open_safe(self) -> bool {
        self.revealed && !self.has_mine
    }

    pub const fn is_exposed_mine(self) -> bool {
        self.revealed && self.has_mine
    }
}
