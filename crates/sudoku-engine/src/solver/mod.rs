//! Depth-first backtracking search with a step-event protocol.
//!
//! The search tries digits in ascending order at the first empty cell in
//! row-major order, so the event trace for a given board is fully
//! deterministic.

pub(crate) mod backtrack;

use crate::{Grid, Position, BOX_SIZE, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// What a [`Step`] did to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// A digit was tentatively written into the cell.
    Place,
    /// The digit was retracted and the cell reset to empty.
    Remove,
}

/// One mutation of the board during search, delivered to the step hook
/// immediately after it happens. `value` is the placed digit for
/// [`StepAction::Place`] and 0 for [`StepAction::Remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub pos: Position,
    pub value: u8,
    pub action: StepAction,
}

/// Can `value` legally occupy `pos` given the current board?
///
/// Scans `pos`'s row, column, and box for another cell holding `value`.
/// The cell at `pos` itself is excluded from the scan: the solver calls this
/// *before* placing, but it means the check can return `true` for a digit the
/// cell already holds. Callers validating an already-placed digit should
/// clear the cell first or use [`Grid::find_conflicts`] instead.
///
/// `value` is expected to be in `1..=9`; an out-of-range position panics.
pub fn is_valid(grid: &Grid, value: u8, pos: Position) -> bool {
    for i in 0..GRID_SIZE {
        if i != pos.col && grid.get(Position::new(pos.row, i)) == value {
            return false;
        }
        if i != pos.row && grid.get(Position::new(i, pos.col)) == value {
            return false;
        }
    }

    let box_row = (pos.row / BOX_SIZE) * BOX_SIZE;
    let box_col = (pos.col / BOX_SIZE) * BOX_SIZE;
    for row in box_row..box_row + BOX_SIZE {
        for col in box_col..box_col + BOX_SIZE {
            if (row, col) != (pos.row, pos.col) && grid.get(Position::new(row, col)) == value {
                return false;
            }
        }
    }
    true
}

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve `grid` in place, invoking `on_step` synchronously on every
    /// tentative placement and every retraction.
    ///
    /// Returns `true` with the grid fully filled on success. Returns `false`
    /// when no completion exists — a normal outcome for contradictory givens,
    /// not an error — with every cell the search touched restored to empty.
    ///
    /// The hook may render, log, or sleep, but must not mutate the grid; the
    /// reference it receives is the live board mid-search.
    pub fn solve_in_place<F>(&self, grid: &mut Grid, mut on_step: F) -> bool
    where
        F: FnMut(&Grid, Step),
    {
        let mut placements = 0u64;
        let mut retractions = 0u64;
        let solved = backtrack::solve_recursive(grid, &mut |grid: &Grid, step: Step| {
            match step.action {
                StepAction::Place => {
                    placements += 1;
                    log::trace!("place {} at {}", step.value, step.pos);
                }
                StepAction::Remove => {
                    retractions += 1;
                    log::trace!("remove at {}", step.pos);
                }
            }
            on_step(grid, step);
        });
        log::debug!(
            "search finished: solved={solved}, placements={placements}, retractions={retractions}"
        );
        solved
    }

    /// Solve without observing steps, returning the solved grid if one exists.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = *grid;
        if self.solve_in_place(&mut working, |_, _| {}) {
            Some(working)
        } else {
            None
        }
    }

    /// Solve a copy of `grid` and collect the full step trace.
    pub fn solve_steps(&self, grid: &Grid) -> (Option<Grid>, Vec<Step>) {
        let mut working = *grid;
        let mut steps = Vec::new();
        let solved = self.solve_in_place(&mut working, |_, step| steps.push(step));
        (solved.then_some(working), steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const EASY_SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn assert_solved(grid: &Grid) {
        assert!(grid.is_complete());
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_solve_easy() {
        let grid = Grid::from_string(EASY).unwrap();
        let solver = Solver::new();
        let solution = solver.solve(&grid).unwrap();
        assert_solved(&solution);
        assert_eq!(solution.to_string_line(), EASY_SOLVED);
    }

    #[test]
    fn test_solve_preserves_givens() {
        let grid = Grid::from_string(EASY).unwrap();
        let solution = Solver::new().solve(&grid).unwrap();
        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                if !grid.is_empty(pos) {
                    assert_eq!(grid.get(pos), solution.get(pos));
                }
            }
        }
    }

    #[test]
    fn test_empty_grid_row_zero_ascending() {
        // Row-major scan plus ascending digits makes row 0 come out 1..=9.
        let mut grid = Grid::new();
        assert!(Solver::new().solve_in_place(&mut grid, |_, _| {}));
        assert_solved(&grid);
        for col in 0..9 {
            assert_eq!(grid.get(Position::new(0, col)), (col + 1) as u8);
        }
    }

    #[test]
    fn test_contradictory_givens_restore_grid() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), 5).unwrap();
        grid.set(Position::new(0, 1), 5).unwrap();
        let original = grid;

        assert!(!Solver::new().solve_in_place(&mut grid, |_, _| {}));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_no_candidate_fails_without_steps() {
        // (0, 0) is the first empty cell; digits 2..=9 are in its row and 1
        // is in its column, so the search exhausts before any placement.
        let mut grid = Grid::from_string(
            "023456789100000000000000000000000000000000000000000000000000000000000000000000000",
        )
        .unwrap();
        let original = grid;
        assert!(grid.is_consistent());

        let mut events = 0;
        assert!(!Solver::new().solve_in_place(&mut grid, |_, _| events += 1));
        assert_eq!(events, 0);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_solved_grid_is_idempotent() {
        let mut grid = Grid::from_string(EASY_SOLVED).unwrap();
        let mut events = 0;
        assert!(Solver::new().solve_in_place(&mut grid, |_, _| events += 1));
        assert_eq!(events, 0);
        assert_eq!(grid.to_string_line(), EASY_SOLVED);
    }

    #[test]
    fn test_single_empty_cell_one_place_no_remove() {
        let mut line = EASY_SOLVED.to_string();
        let missing = line.remove(40);
        line.insert(40, '0');
        let mut grid = Grid::from_string(&line).unwrap();

        let mut steps = Vec::new();
        assert!(Solver::new().solve_in_place(&mut grid, |_, step| steps.push(step)));
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0],
            Step {
                pos: Position::new(4, 4),
                value: missing as u8 - b'0',
                action: StepAction::Place,
            }
        );
        assert_eq!(grid.to_string_line(), EASY_SOLVED);
    }

    #[test]
    fn test_trace_is_deterministic() {
        let grid = Grid::from_string(EASY).unwrap();
        let solver = Solver::new();
        let (first_solution, first_trace) = solver.solve_steps(&grid);
        let (second_solution, second_trace) = solver.solve_steps(&grid);
        assert_eq!(first_solution, second_solution);
        assert_eq!(first_trace, second_trace);
        assert!(!first_trace.is_empty());
    }

    #[test]
    fn test_trace_ends_with_final_placement() {
        let grid = Grid::from_string(EASY).unwrap();
        let (solution, steps) = Solver::new().solve_steps(&grid);
        let solution = solution.unwrap();

        // The last event is always a successful placement, and replaying the
        // whole trace onto the input reproduces the solution.
        let last = steps.last().unwrap();
        assert_eq!(last.action, StepAction::Place);

        let mut replay = grid;
        for step in &steps {
            replay.set(step.pos, step.value).unwrap();
        }
        assert_eq!(replay, solution);
    }

    #[test]
    fn test_is_valid_duplicate_in_row() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), 5).unwrap();
        grid.set(Position::new(0, 1), 5).unwrap();
        assert!(!is_valid(&grid, 5, Position::new(0, 0)));
    }

    #[test]
    fn test_is_valid_excludes_own_cell() {
        // The scan skips the cell under test, so a digit the cell already
        // holds still reads as placeable there.
        let mut grid = Grid::new();
        grid.set(Position::new(4, 4), 7).unwrap();
        assert!(is_valid(&grid, 7, Position::new(4, 4)));
        // But not anywhere else in its row, column, or box.
        assert!(!is_valid(&grid, 7, Position::new(4, 0)));
        assert!(!is_valid(&grid, 7, Position::new(0, 4)));
        assert!(!is_valid(&grid, 7, Position::new(3, 3)));
        assert!(is_valid(&grid, 7, Position::new(0, 0)));
    }

    // Reference formulation of the validity check: one pass over the whole
    // board collecting every digit that shares a unit with `pos` into a seen
    // array, then a single lookup. Shares no scan structure with `is_valid`.
    fn seen_array_is_valid(grid: &Grid, value: u8, pos: Position) -> bool {
        let mut seen = [false; 10];
        for row in 0..9 {
            for col in 0..9 {
                if (row, col) == (pos.row, pos.col) {
                    continue;
                }
                let other = Position::new(row, col);
                if row == pos.row || col == pos.col || other.box_index() == pos.box_index() {
                    seen[grid.get(other) as usize] = true;
                }
            }
        }
        !seen[value as usize]
    }

    #[test]
    fn test_is_valid_is_scan_order_invariant() {
        // The boolean result must not depend on how the row/column/box scans
        // are ordered or interleaved; cross-check every empty cell and digit
        // against the seen-array reference.
        let grid = Grid::from_string(EASY).unwrap();
        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                if !grid.is_empty(pos) {
                    continue;
                }
                for value in 1..=9u8 {
                    assert_eq!(
                        is_valid(&grid, value, pos),
                        seen_array_is_valid(&grid, value, pos),
                        "disagreement at {pos} for {value}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_step_serializes() {
        let step = Step {
            pos: Position::new(2, 3),
            value: 7,
            action: StepAction::Place,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }
}
