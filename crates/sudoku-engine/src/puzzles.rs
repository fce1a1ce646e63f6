//! Built-in boards for demos, tests, and the CLI's default run.

use crate::Grid;

const EXAMPLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// A classic easy puzzle with a unique solution.
pub fn example() -> Grid {
    Grid::from_string(EXAMPLE).expect("built-in puzzle is well-formed")
}

/// The all-empty board.
pub fn empty() -> Grid {
    Grid::new()
}
