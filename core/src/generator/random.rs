use ndarray::Array2;

use super::*;

/// Uniform placement by rejection sampling: draw a random row and column, skip it if
/// it already holds a mine, repeat until enough mines are placed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn mine_positions(self, size: Coord2, count: CellCount) -> Vec<Coord2> {
        use rand::prelude::*;

        let (rows, cols) = size;
        let total_cells = mult(rows, cols);
        if total_cells == 0 {
            return Vec::new();
        }

        // a full board would never finish sampling
        let target = if count > total_cells {
            log::warn!(
                "Requested {} mines but only {} cells exist, capping",
                count,
                total_cells
            );
            total_cells
        } else {
            count
        };

        let mut taken: Array2<bool> = Array2::default(size.to_nd_index());
        let mut positions = Vec::with_capacity(target.into());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut rejected: u32 = 0;

        while positions.len() < usize::from(target) {
            let pos = (rng.random_range(0..rows), rng.random_range(0..cols));
            if taken[pos.to_nd_index()] {
                rejected += 1;
                continue;
            }
            taken[pos.to_nd_index()] = true;
            positions.push(pos);
        }

        log::trace!(
            "sampled {} mines with {} rejections (seed {})",
            positions.len(),
            rejected,
            self.seed
        );
        positions
    }
}
