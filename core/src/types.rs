use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iteration over the Moore neighborhood of a position, clipped to the grid.
pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(center, bounds)
    }
}

/// Walks the 3x3 block around `center` row by row, skipping the center itself and
/// anything past the edges. No wraparound.
///
/// Holds no borrow of the grid, so the grid can be mutated while iterating.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offset: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offset: 0,
        }
    }

    fn step(&self, offset: u8) -> Option<Coord2> {
        let (row, col) = self.center;
        let (rows, cols) = self.bounds;

        // offset 0..9 encodes (dr, dc) in -1..=1 x -1..=1
        let dr = (offset / 3) as i8 - 1;
        let dc = (offset % 3) as i8 - 1;
        if dr == 0 && dc == 0 {
            return None;
        }

        let next_row = row.checked_add_signed(dr)?;
        let next_col = col.checked_add_signed(dc)?;
        (next_row < rows && next_col < cols).then_some((next_row, next_col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < 9 {
            let offset = self.offset;
            self.offset += 1;
            if let Some(pos) = self.step(offset) {
                return Some(pos);
            }
        }
        None
    }
}
