mod render;

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use sudoku_engine::{puzzles, Grid, Solver, Step};

/// Watch a backtracking Sudoku solve, one trial placement at a time.
#[derive(Parser)]
#[command(name = "sudoku-solve", version, about)]
struct Args {
    /// 81-character puzzle string in row-major order; 0 or . marks an empty
    /// cell. Defaults to a built-in example puzzle.
    puzzle: Option<String>,

    /// Read the puzzle string from a file instead.
    #[arg(long, conflicts_with = "puzzle")]
    puzzle_file: Option<PathBuf>,

    /// Milliseconds to pause after each search step.
    #[arg(long, default_value_t = 40)]
    delay: u64,

    /// Solve at full speed without drawing intermediate boards.
    #[arg(long)]
    no_animate: bool,

    /// Log every search step to stderr instead of animating.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.trace);

    let grid = match load_grid(&args) {
        Ok(grid) => grid,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let conflicts = grid.find_conflicts();
    if !conflicts.is_empty() {
        eprintln!("puzzle has conflicting givens at:");
        for pos in conflicts {
            eprintln!("  {pos}: {}", grid.get(pos));
        }
        return ExitCode::from(2);
    }

    info!(
        "solving: {} givens, {} empty cells",
        grid.given_count(),
        grid.empty_count()
    );

    let mut working = grid;
    let outcome = if args.no_animate || args.trace {
        let mut steps = 0u64;
        let solved = Solver::new().solve_in_place(&mut working, |_, _| steps += 1);
        Ok((solved, steps))
    } else {
        animate(&mut working, Duration::from_millis(args.delay))
    };

    match outcome {
        Err(e) => {
            eprintln!("terminal error: {e}");
            ExitCode::from(2)
        }
        Ok((true, steps)) => {
            println!("{working}");
            println!("solved in {steps} steps");
            ExitCode::SUCCESS
        }
        Ok((false, steps)) => {
            // A normal outcome for over-constrained givens, not an error.
            println!("no solution exists for this puzzle ({steps} steps tried)");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(trace: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if trace {
        // Surface the engine's per-step trace events without needing RUST_LOG.
        builder.filter_module("sudoku_engine", log::LevelFilter::Trace);
        builder.filter_module("sudoku_solve", log::LevelFilter::Info);
    }
    builder.init();
}

fn load_grid(args: &Args) -> Result<Grid, String> {
    let line = if let Some(puzzle) = &args.puzzle {
        puzzle.clone()
    } else if let Some(path) = &args.puzzle_file {
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?
    } else {
        info!("no puzzle given, using the built-in example");
        return Ok(puzzles::example());
    };
    let line: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    Grid::from_string(&line).map_err(|e| format!("bad puzzle: {e}"))
}

fn animate(grid: &mut Grid, delay: Duration) -> io::Result<(bool, u64)> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let mut animator = Animator {
        stdout,
        delay,
        fast_forward: false,
        steps: 0,
        error: None,
    };
    let solved = Solver::new().solve_in_place(grid, |board, step| animator.on_step(board, step));

    // Restore terminal before reporting anything
    let Animator {
        mut stdout,
        steps,
        error,
        ..
    } = animator;
    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    // A failed frame write only stopped the drawing; the search itself ran
    // to completion, so report its outcome rather than the render error.
    if let Some(e) = error {
        log::warn!("animation stopped after a terminal write error: {e}");
    }
    Ok((solved, steps))
}

/// Draws one frame per step event and paces the search. Pressing q, Esc, or
/// Ctrl+C stops drawing and lets the search finish at full speed.
struct Animator {
    stdout: io::Stdout,
    delay: Duration,
    fast_forward: bool,
    steps: u64,
    error: Option<io::Error>,
}

impl Animator {
    fn on_step(&mut self, grid: &Grid, step: Step) {
        self.steps += 1;
        if self.fast_forward || self.error.is_some() {
            return;
        }
        if let Err(e) = self.frame(grid, step) {
            self.error = Some(e);
        }
    }

    fn frame(&mut self, grid: &Grid, step: Step) -> io::Result<()> {
        render::draw_board(&mut self.stdout, grid, Some(step), self.steps)?;
        self.stdout.flush()?;

        // The poll timeout doubles as the per-step delay.
        if event::poll(self.delay)? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.fast_forward = true;
                }
            }
        }
        Ok(())
    }
}
