use super::*;

/// Plants mines exactly where it is told to, for fixtures and tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    coords: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub const fn new(coords: &'a [Coord2]) -> Self {
        Self { coords }
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn mine_positions(self, _size: Coord2, _count: CellCount) -> Vec<Coord2> {
        self.coords.to_vec()
    }
}
