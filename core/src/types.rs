use ndarray::Array2;

/// Single board axis, used for row/column positions and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position or board size as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Grid position helpers shared by every `Array2` in the crate.
pub trait GridPos: Copy {
    /// Index into an `Array2` laid out as `[row, col]`.
    fn nd(self) -> [usize; 2];

    fn within(self, size: Coord2) -> bool;
}

impl GridPos for Coord2 {
    fn nd(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }

    fn within(self, (rows, cols): Coord2) -> bool {
        self.0 < rows && self.1 < cols
    }
}

/// Cell count of a board of `size`, saturating instead of overflowing.
pub const fn area((rows, cols): Coord2) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    // grids are only ever allocated from a `Coord2`
    (rows as Coord, cols as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> Neighbors;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> Neighbors {
        Neighbors::new(center, grid_size(self))
    }
}

/// Row/column offsets of the 8-neighbourhood, row-major.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn step(value: Coord, delta: i8, limit: Coord) -> Option<Coord> {
    value.checked_add_signed(delta).filter(|&next| next < limit)
}

/// Iterates the up to 8 grid-adjacent positions of `center`, clipped to the board.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(d_row, d_col)) = OFFSETS.get(self.next) {
            self.next += 1;
            let row = step(self.center.0, d_row, self.bounds.0);
            let col = step(self.center.1, d_col, self.bounds.1);
            if let (Some(row), Some(col)) = (row, col) {
                return Some((row, col));
            }
        }
        None
    }
}
