//! Board module - the Block-Stack grid
//!
//! A 10x20 grid where each cell is empty or tagged with the kind of the piece that
//! settled there. Flat row-major storage, no allocation.
//! Coordinates: (x, y) with x in 0..10 left to right and y in 0..20 top to bottom.

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Row-major cells (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Remove row `y`, shift every row above it down by one and leave an empty row on top.
    pub fn remove_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src = (row - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, row * WIDTH);
        }

        self.cells[..WIDTH].fill(None);
    }

    /// Number of rows with no empty cell
    pub fn full_row_count(&self) -> usize {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Convert to rows for snapshots
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(WIDTH).map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();

        assert!(board.set(5, 10, Some(PieceKind::T)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
        assert!(board.is_occupied(5, 10));

        assert!(!board.set(-1, 0, Some(PieceKind::T)));
        assert!(!board.set(0, 20, Some(PieceKind::T)));
        assert_eq!(board.get(10, 0), None);
    }

    #[test]
    fn test_row_full() {
        let mut board = Board::new();
        for x in 0..9 {
            board.set(x, 19, Some(PieceKind::I));
        }
        assert!(!board.is_row_full(19));
        board.set(9, 19, Some(PieceKind::L));
        assert!(board.is_row_full(19));
        assert!(!board.is_row_full(20));
    }

    #[test]
    fn test_remove_row_shifts_rows_above() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 19, Some(PieceKind::I));
        }
        board.set(2, 18, Some(PieceKind::T));
        board.set(4, 0, Some(PieceKind::O));

        board.remove_row(19);

        assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 1), Some(Some(PieceKind::O)));
        assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_remove_top_row_only_clears_it() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::Z));
        board.set(0, 1, Some(PieceKind::S));
        board.remove_row(0);
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::S)));
    }

    #[test]
    fn test_to_rows_shape() {
        let board = Board::new();
        let rows = board.to_rows();
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|r| r.len() == 10));
    }
}
