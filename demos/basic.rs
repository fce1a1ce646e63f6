//! Basic example of using the Sudoku engine

use sudoku_engine::{is_valid, puzzles, Position, Solver, StepAction};

fn main() {
    let puzzle = puzzles::example();

    println!("Puzzle:");
    println!("{}", puzzle);
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}", puzzle.empty_count());

    // Ask the checker a question the way a UI would during editing
    let pos = Position::new(0, 2);
    for value in [5, 1] {
        println!(
            "Can {} go at {}? {}",
            value,
            pos,
            is_valid(&puzzle, value, pos)
        );
    }

    // Solve while counting the search steps
    let solver = Solver::new();
    let (solution, steps) = solver.solve_steps(&puzzle);

    match solution {
        Some(solution) => {
            println!("\nSolution:");
            println!("{}", solution);

            let placements = steps
                .iter()
                .filter(|s| s.action == StepAction::Place)
                .count();
            let retractions = steps.len() - placements;
            println!("Search steps: {} placements, {} retractions", placements, retractions);
        }
        None => println!("No solution exists for this puzzle."),
    }
}
