use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io;
use sudoku_engine::{Grid, Position, Step, StepAction, BOX_SIZE, GRID_SIZE};

const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 1;

/// Draw the board at a fixed origin, highlighting the cell the last step
/// touched: green for a placement, red for a retraction.
pub fn draw_board(
    stdout: &mut io::Stdout,
    grid: &Grid,
    last: Option<Step>,
    steps: u64,
) -> io::Result<()> {
    for row in 0..GRID_SIZE {
        // One terminal line per row, plus a separator line between box bands.
        let y = ORIGIN_Y + (row + row / BOX_SIZE) as u16;
        if row > 0 && row % BOX_SIZE == 0 {
            execute!(stdout, MoveTo(ORIGIN_X, y - 1), Print("------+-------+------"))?;
        }

        execute!(stdout, MoveTo(ORIGIN_X, y))?;
        for col in 0..GRID_SIZE {
            if col > 0 && col % BOX_SIZE == 0 {
                execute!(stdout, Print("| "))?;
            }

            let pos = Position::new(row, col);
            let color = match last {
                Some(step) if step.pos == pos => match step.action {
                    StepAction::Place => Color::Green,
                    StepAction::Remove => Color::Red,
                },
                _ => Color::White,
            };
            let cell = match grid.get(pos) {
                0 => ". ".to_string(),
                value => format!("{value} "),
            };
            execute!(stdout, SetForegroundColor(color), Print(cell), ResetColor)?;
        }
    }

    let status_y = ORIGIN_Y + (GRID_SIZE + GRID_SIZE / BOX_SIZE) as u16;
    execute!(
        stdout,
        MoveTo(ORIGIN_X, status_y),
        Print(format!("steps: {steps}   [q] skip animation")),
    )?;
    Ok(())
}
