/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
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
    (a as CellCount) * (b as CellCount)
}

/// Moore neighborhood: the up to 8 cells around a center, minus whatever
/// falls outside the board.
const MOORE_OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next_offset: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Coord2> {
        while let Some(&(dx, dy)) = MOORE_OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            let next_x = i16::from(self.center.0) + dx;
            let next_y = i16::from(self.center.1) + dy;
            if (0..i16::from(self.bounds.0)).contains(&next_x)
                && (0..i16::from(self.bounds.1)).contains(&next_y)
            {
                return Some((next_x as Coord, next_y as Coord));
            }
        }
        None
    }
}
