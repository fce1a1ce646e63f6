//! Sudoku engine: grid model, constraint checking, and a backtracking solver
//! that reports every trial placement and retraction as it searches.
//!
//! The solver mutates a single [`Grid`] in place and invokes a caller-supplied
//! hook on each step, so a front end can animate the search or a test can
//! assert on the exact trace. See [`Solver::solve_in_place`].

mod grid;
pub mod puzzles;
mod solver;

pub use grid::{Grid, GridError, Position, BOX_SIZE, GRID_SIZE};
pub use solver::{is_valid, Solver, Step, StepAction};
