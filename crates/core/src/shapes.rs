//! Shapes module - the piece catalog and matrix rotation
//!
//! Every shape is a square matrix (side 1..=4) of cell values stored inline, so
//! shapes are `Copy` and rotation never allocates. A value of `0` means "no cell";
//! any other value is the piece colour written into the field on merge.

use crate::rng::SimpleRng;
use crate::types::{Cell, NO_CELL};

/// Largest supported shape side
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square matrix of cells for one rotation state of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a padded matrix. Only the top-left `size` x `size`
    /// block is meaningful; the padding must be `0`.
    pub const fn new(size: u8, cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self { size, cells }
    }

    /// Build a shape from row slices.
    ///
    /// Returns `None` if the rows are not square or larger than [`MAX_SHAPE_SIZE`].
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_SHAPE_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut cells = [[NO_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row);
        }
        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at (row, col); `0` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size() || col >= self.size() {
            return NO_CELL;
        }
        self.cells[row][col]
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != NO_CELL
    }

    /// Iterate occupied cells as `(row, col, value)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                let cell = self.cells[row][col];
                (cell != NO_CELL).then_some((row, col, cell))
            })
        })
    }

    /// Matrix rows, trimmed to the shape side
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let n = self.size();
        self.cells[..n].iter().map(move |r| &r[..n])
    }

    /// 90° clockwise rotation: `new[y][x] = old[n - 1 - x][y]`
    pub fn rotated(&self) -> Shape {
        let n = self.size();
        let mut cells = [[NO_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Shape {
            size: self.size,
            cells,
        }
    }
}

const I: Shape = Shape::new(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const O: Shape = Shape::new(
    2,
    [[2, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const T: Shape = Shape::new(
    3,
    [[0, 3, 0, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const S: Shape = Shape::new(
    3,
    [[0, 4, 4, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const Z: Shape = Shape::new(
    3,
    [[5, 5, 0, 0], [0, 5, 5, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const J: Shape = Shape::new(
    3,
    [[6, 0, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const L: Shape = Shape::new(
    3,
    [[0, 0, 7, 0], [7, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

static CATALOG: [Shape; 7] = [I, O, T, S, Z, J, L];

/// Number of colours used by the catalog (indices `1..=COLOR_COUNT`)
pub const COLOR_COUNT: Cell = 7;

/// All spawnable shapes in their spawn orientation
pub fn catalog() -> &'static [Shape] {
    &CATALOG
}

/// Pick a catalog shape uniformly at random
pub fn random_shape(rng: &mut SimpleRng) -> Shape {
    CATALOG[rng.next_range(CATALOG.len() as u32) as usize]
}
