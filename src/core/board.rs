//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of
//! a locked piece. Uses a flat array for better cache locality and
//! zero-allocation. Coordinates: (x, y) where x ranges 0..9 (left to right),
//! y ranges 0..19 (top to bottom). Row 0 is the top row.

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows reported by `full_rows`
const MAX_ROWS: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y) to a color
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, color: Color) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = Some(color);
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled).
    /// Out-of-bounds positions, including y < 0 above the board, answer false.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Row indices of all completely filled rows, scanned from the bottom
    /// row up, so the list is in bottom-to-top order.
    pub fn full_rows(&self) -> ArrayVec<usize, MAX_ROWS> {
        let mut rows = ArrayVec::new();
        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows and insert one empty row at the top for each,
    /// shifting everything above each removed row down by one. Surviving
    /// rows keep their relative order. Row indices must be unique; their
    /// order does not matter. Uses a two-pointer compaction with
    /// zero-allocation.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top, keeping rows that are not being removed
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                // Copy row using copy_within (no allocation, handles overlap)
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Blank the freed rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
    }

    /// Reinitialize every cell to empty
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a caller-owned row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                let end = start + width;
                self.cells[start..end].to_vec()
            })
            .collect()
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

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Color::Cyan);
        board.set(5, 10, Color::Purple);

        assert_eq!(board.get(0, 0), Some(Some(Color::Cyan)));
        assert_eq!(board.get(5, 10), Some(Some(Color::Purple)));

        // Verify internal array layout
        assert_eq!(board.cells[0], Some(Color::Cyan));
        assert_eq!(board.cells[10 * 10 + 5], Some(Color::Purple));
    }

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert!(!board.set(-1, 0, Color::Red));
        assert!(!board.set(10, 0, Color::Red));
        assert!(!board.set(0, 20, Color::Red));
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_is_occupied_above_board_is_false() {
        let mut board = Board::new();
        board.set(4, 0, Color::Green);
        assert!(board.is_occupied(4, 0));
        assert!(!board.is_occupied(4, -1));
        assert!(!board.is_occupied(-1, 5));
        assert!(!board.is_occupied(4, 20));
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 20];
        cells_2d[5][3] = Some(Color::Yellow);
        cells_2d[10][7] = Some(Color::Orange);

        let board = Board::from_cells(cells_2d.clone());
        let back_2d = board.to_cells();

        assert_eq!(cells_2d, back_2d);
    }
}
