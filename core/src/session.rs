use core::iter;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Reveal
    Primary,
    /// Flag
    Secondary,
}

/// Caller-side effect requested by a state transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// One per newly opened safe cell.
    Reveal,
    Boom,
    GameOver,
    Flag,
    Win,
}

pub type Cues = SmallVec<[Cue; 8]>;

/// Remembers which one-shot cues already fired this session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueState {
    pub played_boom: bool,
    pub played_game_over: bool,
    pub played_win: bool,
}

impl CueState {
    fn fire_once(played: &mut bool, cue: Cue, cues: &mut Cues) {
        if !*played {
            *played = true;
            cues.push(cue);
        }
    }
}

/// Maps a pointer position in pixels to the cell under it, `None` when it falls
/// outside the grid (for example on the status bar).
pub fn pointer_to_cell(x: f64, y: f64, cell_size: f64, (rows, cols): Coord2) -> Option<Coord2> {
    // also rejects NaN
    if !(x >= 0.0 && y >= 0.0 && cell_size > 0.0) {
        return None;
    }

    // truncation is floor for non-negative values
    let row = (y / cell_size) as u32;
    let col = (x / cell_size) as u32;
    if row < u32::from(rows) && col < u32::from(cols) {
        Some((row as Coord, col as Coord))
    } else {
        None
    }
}

/// One game from first click to win or loss.
///
/// Owns the board and decides which cues to play. Input after the game ended is
/// ignored here; the board itself does not enforce it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    outcome: GameOutcome,
    cues: CueState,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        log::debug!("new session {:?} with seed {}", config, seed);
        let board = Board::generate(config, RandomMineGenerator::new(seed))?;
        Ok(Self::from_board(board))
    }

    pub fn from_board(board: Board) -> Self {
        let outcome = board.outcome();
        Self {
            board,
            outcome,
            cues: CueState::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn cue_state(&self) -> CueState {
        self.cues
    }

    pub fn status_line(&self) -> &'static str {
        match self.outcome {
            GameOutcome::Lost => "GAME OVER!",
            GameOutcome::Won => "YOU WIN!",
            GameOutcome::InProgress => "Left-click: Reveal | Right-click: Flag",
        }
    }

    /// Applies one click and returns the cues to play, in order.
    pub fn handle(&mut self, button: Button, coords: Coord2) -> Cues {
        let mut cues = Cues::new();

        if self.is_finished() {
            log::trace!("ignoring {:?} at {:?}, game is over", button, coords);
            return cues;
        }

        match button {
            Button::Primary => self.reveal(coords, &mut cues),
            Button::Secondary => self.mark(coords, &mut cues),
        }
        cues
    }

    fn reveal(&mut self, coords: Coord2, cues: &mut Cues) {
        match self.board.reveal(coords) {
            RevealOutcome::Blocked => return,
            RevealOutcome::MineHit => {
                log::debug!("mine hit at {:?}", coords);
                CueState::fire_once(&mut self.cues.played_boom, Cue::Boom, cues);
                self.board.reveal_all_mines();
                CueState::fire_once(&mut self.cues.played_game_over, Cue::GameOver, cues);
            }
            RevealOutcome::Revealed(opened) => {
                log::debug!("revealed {:?}, {} cells opened", coords, opened);
                cues.extend(iter::repeat_n(Cue::Reveal, usize::from(opened)));
            }
        }

        self.update_outcome(cues);
    }

    fn mark(&mut self, coords: Coord2, cues: &mut Cues) {
        let outcome = self.board.toggle_flag(coords);
        if outcome.has_update() {
            log::debug!("{:?} at {:?}", outcome, coords);
            cues.push(Cue::Flag);
        }
    }

    fn update_outcome(&mut self, cues: &mut Cues) {
        let outcome = self.board.outcome();
        if outcome != self.outcome {
            log::info!("game {:?} -> {:?}", self.outcome, outcome);
            self.outcome = outcome;
        }

        if outcome == GameOutcome::Won {
            CueState::fire_once(&mut self.cues.played_win, Cue::Win, cues);
        }
    }
}
