//! Field module - the fixed-size grid the pieces fall through
//!
//! Cells are stored in a flat row-major vector for cache locality. Dimensions are
//! set once at construction (from configuration) and never change afterwards.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom). Lookups take signed coordinates so callers can probe
//! positions outside the grid and get `None` back.

use crate::game_state::Piece;
use crate::types::{Cell, EMPTY, NO_CELL};

/// The playfield - `width` columns x `height` rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an all-EMPTY field
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a field from explicit rows (fixtures and tests).
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True if every cell is EMPTY
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }

    /// Write a piece's occupied cells at its offset.
    ///
    /// A cell is only written when the destination exists and holds a non-zero
    /// value. Cells that fall outside the grid are dropped.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (row, col, cell) in piece.shape.occupied() {
            let x = piece.x + col as i32;
            let y = piece.y + row as i32;
            if let Some(i) = self.index(x, y) {
                if self.cells[i] != NO_CELL {
                    self.cells[i] = cell;
                }
            }
        }
    }

    /// Copy of this field with `piece` merged in
    pub fn merged(&self, piece: &Piece) -> Field {
        let mut out = self.clone();
        out.merge_piece(piece);
        out
    }

    /// Delete row `y`, shift every row above it down by one and insert a fresh
    /// EMPTY row at the top. Returns false if `y` is out of range.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
        true
    }

    /// Remove each listed row in order. Row count is preserved.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        for &y in rows {
            self.remove_row(y);
        }
    }

    /// True if row `y` has no EMPTY cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|&cell| cell != EMPTY))
    }

    /// Indices of full rows, top to bottom
    pub fn removable_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }
}
