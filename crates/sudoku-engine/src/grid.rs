//! The 9x9 board: cell storage, parsing, formatting, and consistency checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Board side length.
pub const GRID_SIZE: usize = 9;
/// Side length of one of the nine boxes.
pub const BOX_SIZE: usize = 3;

/// A cell coordinate: row and column, both in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index of the containing 3x3 box, `0..9` in row-major box order.
    pub fn box_index(&self) -> usize {
        (self.row / BOX_SIZE) * BOX_SIZE + self.col / BOX_SIZE
    }

    fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rejected input when building or editing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("puzzle string must be 81 characters, got {0}")]
    BadLength(usize),
    #[error("invalid character {found:?} at offset {offset}")]
    BadChar { found: char, offset: usize },
    #[error("digit {0} out of range 0-9")]
    BadDigit(u8),
    #[error("position {0} out of range")]
    BadPosition(Position),
}

/// A 9x9 Sudoku board. Cells hold `0` (empty) or a digit `1..=9`.
///
/// The type guarantees every cell is in `0..=9`; it does not guarantee the
/// non-zero cells obey the Sudoku uniqueness rules. Use [`Grid::find_conflicts`]
/// or [`Grid::is_consistent`] to check that before handing the grid to the
/// solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid (all cells 0).
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a grid from row-major cell values, rejecting digits above 9.
    pub fn from_rows(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self, GridError> {
        for row in &rows {
            for &value in row {
                if value > 9 {
                    return Err(GridError::BadDigit(value));
                }
            }
        }
        Ok(Self { cells: rows })
    }

    /// Parse an 81-character puzzle string in row-major order.
    ///
    /// `1`-`9` are givens; `0` and `.` both mean an empty cell.
    pub fn from_string(s: &str) -> Result<Self, GridError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != GRID_SIZE * GRID_SIZE {
            return Err(GridError::BadLength(chars.len()));
        }

        let mut grid = Self::new();
        for (offset, &ch) in chars.iter().enumerate() {
            let value = match ch {
                '0' | '.' => 0,
                '1'..='9' => ch as u8 - b'0',
                found => return Err(GridError::BadChar { found, offset }),
            };
            grid.cells[offset / GRID_SIZE][offset % GRID_SIZE] = value;
        }
        Ok(grid)
    }

    /// The canonical 81-character form, `0` for empty cells.
    pub fn to_string_line(&self) -> String {
        let mut out = String::with_capacity(GRID_SIZE * GRID_SIZE);
        for row in &self.cells {
            for &value in row {
                out.push((b'0' + value) as char);
            }
        }
        out
    }

    /// Value at a position: 0 for empty, otherwise the digit.
    ///
    /// Panics if the position is out of range.
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// True if the cell at `pos` is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == 0
    }

    /// Set a cell, range-checking both the position and the value.
    pub fn set(&mut self, pos: Position, value: u8) -> Result<(), GridError> {
        if !pos.in_bounds() {
            return Err(GridError::BadPosition(pos));
        }
        if value > 9 {
            return Err(GridError::BadDigit(value));
        }
        self.cells[pos.row][pos.col] = value;
        Ok(())
    }

    /// Clear a cell back to empty.
    pub fn clear(&mut self, pos: Position) -> Result<(), GridError> {
        self.set(pos, 0)
    }

    /// Write a cell without range checks. Solver-internal fast path; callers
    /// go through [`Grid::set`].
    pub(crate) fn set_unchecked(&mut self, pos: Position, value: u8) {
        self.cells[pos.row][pos.col] = value;
    }

    /// First empty cell in row-major order, or `None` when the board is full.
    ///
    /// This scan order is the solver's cell-selection policy; keeping it here
    /// makes the trace reproducible for any caller driving a search by hand.
    pub fn first_empty(&self) -> Option<Position> {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if self.cells[row][col] == 0 {
                    return Some(Position::new(row, col));
                }
            }
        }
        None
    }

    /// True when no cell is empty.
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&value| value == 0)
            .count()
    }

    /// Number of filled cells.
    pub fn given_count(&self) -> usize {
        GRID_SIZE * GRID_SIZE - self.empty_count()
    }

    /// Positions of every filled cell whose digit repeats in its row, column,
    /// or box. Empty for a consistent board.
    pub fn find_conflicts(&self) -> Vec<Position> {
        let mut conflicts = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = Position::new(row, col);
                let value = self.cells[row][col];
                if value != 0 && self.has_duplicate(pos, value) {
                    conflicts.push(pos);
                }
            }
        }
        conflicts
    }

    /// True if the filled cells obey the row/column/box uniqueness rules.
    pub fn is_consistent(&self) -> bool {
        self.find_conflicts().is_empty()
    }

    /// Does any other cell in `pos`'s row, column, or box hold `value`?
    fn has_duplicate(&self, pos: Position, value: u8) -> bool {
        for i in 0..GRID_SIZE {
            if i != pos.col && self.cells[pos.row][i] == value {
                return true;
            }
            if i != pos.row && self.cells[i][pos.col] == value {
                return true;
            }
        }
        let box_row = (pos.row / BOX_SIZE) * BOX_SIZE;
        let box_col = (pos.col / BOX_SIZE) * BOX_SIZE;
        for row in box_row..box_row + BOX_SIZE {
            for col in box_col..box_col + BOX_SIZE {
                if (row, col) != (pos.row, pos.col) && self.cells[row][col] == value {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.iter().enumerate() {
            if row_idx > 0 && row_idx % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if col_idx > 0 && col_idx % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                if value == 0 {
                    write!(f, ". ")?;
                } else {
                    write!(f, "{} ", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
