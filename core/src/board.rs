use alloc::collections::VecDeque;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size minefield and the player's view of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    total_mines: CellCount,
    mines_placed: bool,
    flagged_count: Saturating<CellCount>,
    detonated: Option<Coord2>,
}

impl Board {
    /// All cells hidden, unflagged and mine free.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            total_mines: 0,
            mines_placed: false,
            flagged_count: Saturating(0),
            detonated: None,
        }
    }

    /// New board with mines from `generator` and adjacency counts filled in.
    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;
        let mut board = Self::new(config.size);
        board.place_mines(generator, config.mines)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// New board with mines at exactly `mine_coords`, adjacency filled in.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let count: CellCount = mine_coords
            .len()
            .try_into()
            .map_err(|_| GameError::TooManyMines {
                requested: CellCount::MAX,
                capacity: mult(size.0, size.1),
            })?;
        let mut board = Self::new(size);
        board.place_mines(FixedMineGenerator::new(mine_coords), count)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// Plants `count` distinct mines chosen by `generator`.
    ///
    /// The board is left untouched when the generator output is rejected.
    pub fn place_mines(&mut self, generator: impl MineGenerator, count: CellCount) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        check_mine_count(count, self.total_cells())?;

        let positions = generator.mine_positions(self.size(), count);
        let mut planted: Array2<bool> = Array2::default(self.cells.dim());
        let mut actual: CellCount = 0;
        for &pos in &positions {
            let pos = self.validate_coords(pos)?;
            if !planted[pos.to_nd_index()] {
                planted[pos.to_nd_index()] = true;
                actual += 1;
            }
        }

        if actual != count || positions.len() != usize::from(count) {
            return Err(GameError::MineCountMismatch {
                expected: count,
                actual,
            });
        }

        for (cell, &has_mine) in self.cells.iter_mut().zip(planted.iter()) {
            cell.has_mine = has_mine;
        }
        self.total_mines = count;
        self.mines_placed = true;
        log::debug!("placed {} mines on a {:?} board", count, self.size());
        Ok(())
    }

    /// Fills `adjacent_mine_count` for every safe cell. Run once, after placement and
    /// before the first reveal.
    pub fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].has_mine {
                    continue;
                }
                let count = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].has_mine)
                    .count();
                // at most 8 neighbors
                self.cells[coords.to_nd_index()].adjacent_mine_count = count as u8;
            }
        }
        log::debug!("adjacency computed for {} cells", self.total_cells());
    }

    /// Opens the cell at `coords`, flood filling outwards from zero-count cells.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return RevealOutcome::Blocked;
        };
        if !cell.can_reveal() {
            return RevealOutcome::Blocked;
        }

        self.cells[coords.to_nd_index()].revealed = true;
        if cell.has_mine {
            self.detonated = Some(coords);
            return RevealOutcome::MineHit;
        }

        let mut opened: CellCount = 1;
        if cell.adjacent_mine_count == 0 {
            let mut to_visit = VecDeque::from([coords]);
            while let Some(visit_coords) = to_visit.pop_front() {
                for pos in self.cells.iter_neighbors(visit_coords) {
                    let neighbor = &mut self.cells[pos.to_nd_index()];
                    if neighbor.revealed || neighbor.flagged || neighbor.has_mine {
                        continue;
                    }
                    neighbor.revealed = true;
                    opened += 1;
                    if neighbor.adjacent_mine_count == 0 {
                        to_visit.push_back(pos);
                    }
                }
            }
            log::trace!("flood fill from {:?} opened {} cells", coords, opened);
        }

        RevealOutcome::Revealed(opened)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.contains(coords) {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return MarkOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
            MarkOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            MarkOutcome::Unflagged
        }
    }

    /// Exposes every mine, leaving safe cells as they are. Flags on exposed mines are
    /// dropped, a revealed cell is never flagged. Returns how many mines were newly
    /// exposed.
    pub fn reveal_all_mines(&mut self) -> CellCount {
        let mut exposed = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.has_mine) {
            if cell.revealed {
                continue;
            }
            if cell.flagged {
                cell.flagged = false;
                self.flagged_count -= 1;
            }
            cell.revealed = true;
            exposed += 1;
        }
        exposed
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.cells.iter().any(|cell| cell.is_exposed_mine()) {
            GameOutcome::Lost
        } else if self.revealed_safe_count() == self.safe_cell_count() {
            GameOutcome::Won
        } else {
            GameOutcome::InProgress
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // built from a `Coord2`, so both fit
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    /// Cells in row-major order with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.total_mines
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_open_safe()).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mines_left(&self) -> isize {
        (self.total_mines as isize) - (self.flagged_count.0 as isize)
    }

    /// The mine the player stepped on, if any.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_mines(size, mines).unwrap()
    }

    fn count_at(board: &Board, coords: Coord2) -> u8 {
        board.cell_at(coords).unwrap().adjacent_mine_count
    }

    fn is_revealed(board: &Board, coords: Coord2) -> bool {
        board.cell_at(coords).unwrap().revealed
    }

    #[test]
    fn new_board_is_all_default_cells() {
        let board = Board::new((4, 7));

        assert_eq!(board.size(), (4, 7));
        assert_eq!(board.total_cells(), 28);
        assert!(board.iter_cells().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn random_placement_plants_exact_count() {
        let config = GameConfig::CLASSIC;
        for seed in 0..20 {
            let board = Board::generate(config, RandomMineGenerator::new(seed)).unwrap();
            let mines = board.iter_cells().filter(|(_, cell)| cell.has_mine).count();

            assert_eq!(mines, 10);
            assert_eq!(board.total_mines(), 10);
        }
    }

    #[test]
    fn placement_rejects_too_many_mines() {
        let mut board = Board::new((3, 3));

        let result = board.place_mines(RandomMineGenerator::new(1), 9);

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                requested: 9,
                capacity: 9
            })
        );
        assert_eq!(board.total_mines(), 0);
    }

    #[test]
    fn placement_rejects_second_call() {
        let mut board = board((3, 3), &[(0, 0)]);

        let result = board.place_mines(RandomMineGenerator::new(1), 1);

        assert_eq!(result, Err(GameError::MinesAlreadyPlaced));
    }

    #[test]
    fn placement_rejects_second_call_after_empty_placement() {
        let mut board = board((3, 3), &[]);
        board.reveal((0, 0));
        let snapshot = board.clone();

        let result = board.place_mines(RandomMineGenerator::new(1), 2);

        assert_eq!(result, Err(GameError::MinesAlreadyPlaced));
        assert_eq!(board, snapshot);
        assert!(board.iter_cells().all(|(_, cell)| !cell.has_mine));
    }

    #[test]
    fn fixed_placement_validates_generator_output() {
        assert_eq!(
            Board::with_mines((3, 3), &[(0, 0), (3, 0)]),
            Err(GameError::InvalidCoords((3, 0)))
        );
        assert_eq!(
            Board::with_mines((3, 3), &[(1, 1), (1, 1)]),
            Err(GameError::MineCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn adjacency_on_hand_built_board() {
        // M . .
        // . . .
        // . . M
        let board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(count_at(&board, (0, 1)), 1);
        assert_eq!(count_at(&board, (0, 2)), 0);
        assert_eq!(count_at(&board, (1, 0)), 1);
        assert_eq!(count_at(&board, (1, 1)), 2);
        assert_eq!(count_at(&board, (1, 2)), 1);
        assert_eq!(count_at(&board, (2, 0)), 0);
        assert_eq!(count_at(&board, (2, 1)), 1);
        assert_eq!(count_at(&board, (0, 0)), 0);
        assert_eq!(count_at(&board, (2, 2)), 0);
    }

    #[test]
    fn adjacency_matches_brute_force_on_random_board() {
        let config = GameConfig::new((8, 11), 30).unwrap();
        let board = Board::generate(config, RandomMineGenerator::new(99)).unwrap();

        for ((row, col), cell) in board.iter_cells().filter(|(_, cell)| !cell.has_mine) {
            let mut expected = 0;
            for r in row.saturating_sub(1)..=(row + 1).min(7) {
                for c in col.saturating_sub(1)..=(col + 1).min(10) {
                    if (r, c) != (row, col) && board.cell_at((r, c)).unwrap().has_mine {
                        expected += 1;
                    }
                }
            }
            assert_eq!(cell.adjacent_mine_count, expected, "at {:?}", (row, col));
        }
    }

    #[test]
    fn corner_mines_on_classic_board() {
        let board = board((9, 9), &[(0, 0), (0, 1)]);

        assert_eq!(count_at(&board, (1, 1)), 2);
        assert_eq!(count_at(&board, (1, 0)), 2);
        assert_eq!(count_at(&board, (0, 2)), 1);
        assert_eq!(count_at(&board, (1, 2)), 1);
        assert_eq!(count_at(&board, (2, 2)), 0);
    }

    #[test]
    fn flood_fill_opens_the_whole_safe_region() {
        let mut board = board((9, 9), &[(0, 0), (0, 1)]);

        let outcome = board.reveal((5, 5));

        assert_eq!(outcome, RevealOutcome::Revealed(79));
        assert!(board.iter_cells().all(|(_, cell)| cell.revealed != cell.has_mine));
        assert_eq!(board.outcome(), GameOutcome::Won);
    }

    #[test]
    fn flood_fill_on_mine_free_board_reveals_everything() {
        let mut board = Board::new((6, 4));
        board.compute_adjacency();

        assert_eq!(board.reveal((2, 1)), RevealOutcome::Revealed(24));
        assert!(board.iter_cells().all(|(_, cell)| cell.revealed));
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // a wall of mines in column 2 splits the board
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        let outcome = board.reveal((1, 0));

        assert_eq!(outcome, RevealOutcome::Revealed(6));
        assert!(is_revealed(&board, (0, 1)));
        assert_eq!(count_at(&board, (1, 1)), 3);
        assert!(!is_revealed(&board, (1, 3)));
        assert!(!is_revealed(&board, (1, 4)));
    }

    #[test]
    fn numbered_cell_does_not_propagate() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed(1));
        assert!(!is_revealed(&board, (2, 2)));
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = Board::new((1, 5));
        board.compute_adjacency();
        board.toggle_flag((0, 2));

        assert_eq!(board.reveal((0, 0)), RevealOutcome::Revealed(2));
        assert!(!is_revealed(&board, (0, 2)));
        assert!(!is_revealed(&board, (0, 3)));
        assert!(board.cell_at((0, 2)).unwrap().flagged);
    }

    #[test]
    fn revealing_flagged_cell_is_blocked() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::Flagged);
        assert_eq!(board.reveal((1, 1)), RevealOutcome::Blocked);
        assert!(!is_revealed(&board, (1, 1)));

        assert_eq!(board.toggle_flag((1, 1)), MarkOutcome::Unflagged);
        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed(1));
    }

    #[test]
    fn reveal_out_of_bounds_is_blocked() {
        let mut board = board((3, 3), &[(0, 0)]);
        let before = board.clone();

        assert_eq!(board.reveal((3, 0)), RevealOutcome::Blocked);
        assert_eq!(board.reveal((0, 200)), RevealOutcome::Blocked);
        assert_eq!(board.toggle_flag((9, 9)), MarkOutcome::NoChange);
        assert_eq!(board, before);
    }

    #[test]
    fn second_reveal_is_idempotent() {
        let mut board = board((4, 4), &[(3, 3)]);

        let first = board.reveal((0, 0));
        let snapshot = board.clone();
        let second = board.reveal((0, 0));

        assert!(first.opened() > 0);
        assert_eq!(second, RevealOutcome::Blocked);
        assert_eq!(second.opened(), 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flagging_revealed_cell_is_no_change() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((2, 2));

        assert_eq!(board.toggle_flag((2, 2)), MarkOutcome::NoChange);
        assert!(!board.cell_at((2, 2)).unwrap().flagged);
    }

    #[test]
    fn flag_counter_tracks_toggles() {
        let mut board = board((3, 3), &[(0, 0), (0, 1)]);

        board.toggle_flag((0, 0));
        board.toggle_flag((2, 2));
        assert_eq!(board.flagged_count(), 2);
        assert_eq!(board.mines_left(), 0);

        board.toggle_flag((1, 1));
        assert_eq!(board.mines_left(), -1);

        board.toggle_flag((2, 2));
        board.toggle_flag((1, 1));
        assert_eq!(board.flagged_count(), 1);
    }

    #[test]
    fn mine_hit_loses_and_reveal_all_mines_leaves_safe_cells() {
        let mines = [(0, 0), (2, 3), (3, 1)];
        let mut board = board((4, 4), &mines);
        board.reveal((0, 3));
        let safe_before: Vec<_> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.has_mine)
            .collect();

        assert_eq!(board.reveal((2, 3)), RevealOutcome::MineHit);
        assert_eq!(board.outcome(), GameOutcome::Lost);
        assert_eq!(board.detonated(), Some((2, 3)));

        assert_eq!(board.reveal_all_mines(), 2);
        for pos in mines {
            assert!(is_revealed(&board, pos));
        }
        let safe_after: Vec<_> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.has_mine)
            .collect();
        assert_eq!(safe_before, safe_after);
        assert_eq!(board.outcome(), GameOutcome::Lost);
    }

    #[test]
    fn reveal_all_mines_drops_flags_on_exposed_mines() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        board.toggle_flag((0, 0));
        board.toggle_flag((1, 1));
        assert_eq!(board.flagged_count(), 2);

        assert_eq!(board.reveal((2, 2)), RevealOutcome::MineHit);
        assert_eq!(board.reveal_all_mines(), 1);

        let mine = board.cell_at((0, 0)).unwrap();
        assert!(mine.revealed);
        assert!(!mine.flagged);
        assert!(board.iter_cells().all(|(_, cell)| !(cell.revealed && cell.flagged)));
        // the misplaced flag on a safe cell stays
        assert!(board.cell_at((1, 1)).unwrap().flagged);
        assert_eq!(board.flagged_count(), 1);
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn won_only_after_last_safe_cell() {
        // isolated numbered cells so every reveal opens exactly one
        let mines = [(0, 1), (1, 0), (1, 1)];
        let mut board = board((2, 3), &mines);
        let safe: Vec<_> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.has_mine)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(safe.len(), 3);

        let (last, rest) = safe.split_last().unwrap();
        for &pos in rest {
            assert_eq!(board.reveal(pos), RevealOutcome::Revealed(1));
            assert_eq!(board.outcome(), GameOutcome::InProgress);
        }
        assert_eq!(board.reveal(*last), RevealOutcome::Revealed(1));
        assert_eq!(board.revealed_safe_count(), board.safe_cell_count());
        assert_eq!(board.outcome(), GameOutcome::Won);
    }

    #[test]
    fn board_snapshot_round_trips_through_json() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.toggle_flag((0, 0));
        board.reveal((2, 2));

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
    }
}
