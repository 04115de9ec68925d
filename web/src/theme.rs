use sweeper_core::{Coord2, GameOutcome};

pub(crate) const BACKGROUND: &str = "#30632f";
pub(crate) const GRID_LINE: &str = "#6e6e6e";
pub(crate) const NUMBER: &str = "#0079f1";
pub(crate) const FLAG: &str = "#e62937";
/// Drawn in place of the boom texture until it has loaded.
pub(crate) const MINE_FALLBACK: &str = "#202020";

const HIDDEN: [&str; 2] = ["#bee091", "#aad687"];
const REVEALED: [&str; 2] = ["#f0d2aa", "#e1c396"];

/// Checkerboard fill for a cell.
pub(crate) fn cell_fill((row, col): Coord2, revealed: bool) -> &'static str {
    let shade = (usize::from(row) + usize::from(col)) % 2;
    if revealed {
        REVEALED[shade]
    } else {
        HIDDEN[shade]
    }
}

pub(crate) const fn status_color(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Lost => "#e62937",
        GameOutcome::Won => "#00e430",
        GameOutcome::InProgress => "#f5f5f5",
    }
}
