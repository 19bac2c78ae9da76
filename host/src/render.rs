//! Read-only ASCII view of a maze and its runner

use maze_core::{MazeGrid, Position};

/// Glyph drawn at the runner's position
pub const RUNNER_GLYPH: char = '@';

/// Render the grid one line per row.
///
/// Visit counts show as digits (`+` past nine), so a rendered maze loads back
/// with its marks. The runner, when given and inside the grid, replaces the
/// cell it stands on.
pub fn render_ascii(grid: &MazeGrid, runner: Option<Position>) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for (row, cells) in grid.rows_iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let here = Position::new(row as i32, col as i32);
            if runner == Some(here) {
                out.push(RUNNER_GLYPH);
            } else {
                out.push(cell.to_symbol());
            }
        }
        out.push('\n');
    }

    out
}
