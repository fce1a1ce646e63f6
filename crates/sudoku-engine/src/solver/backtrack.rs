//! The recursive search. Chronological backtracking over the first empty
//! cell in row-major order, digits tried in ascending order.

use super::{is_valid, Step, StepAction};
use crate::Grid;

/// Recursion depth is bounded by the number of empty cells, at most 81.
pub(crate) fn solve_recursive<F>(grid: &mut Grid, on_step: &mut F) -> bool
where
    F: FnMut(&Grid, Step),
{
    let Some(pos) = grid.first_empty() else {
        // No empty cell left; the placed digits were validated on the way in.
        return true;
    };

    for value in 1..=9u8 {
        if !is_valid(grid, value, pos) {
            continue;
        }

        grid.set_unchecked(pos, value);
        on_step(
            grid,
            Step {
                pos,
                value,
                action: StepAction::Place,
            },
        );

        if solve_recursive(grid, on_step) {
            return true;
        }

        grid.set_unchecked(pos, 0);
        on_step(
            grid,
            Step {
                pos,
                value: 0,
                action: StepAction::Remove,
            },
        );
    }

    false
}
