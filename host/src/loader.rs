//! Text loader: maze files into populated grids
//!
//! One maze row per line. The widest line sets the column count and shorter
//! lines are padded with walls. Every character goes through
//! [`MazeGrid::set`], so its symbol table applies unchanged.

use std::fs;
use std::path::Path;

use maze_core::{MazeGrid, Position, MAX_GRID_CELLS, PAD_SYMBOL};

use crate::{Error, Result};

/// Largest maze file accepted (prevent loading gigabytes into memory)
pub const MAX_MAZE_BYTES: usize = 10_000_000;

/// Build a grid from maze text.
///
/// With `strict` the maze must have exactly one start and one goal door.
pub fn parse_maze(text: &str, strict: bool) -> Result<MazeGrid> {
    if text.len() > MAX_MAZE_BYTES {
        return Err(Error::TooLarge {
            bytes: text.len(),
            max: MAX_MAZE_BYTES,
        });
    }

    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let rows = lines.len();
    let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(Error::EmptyMaze);
    }
    if rows.checked_mul(cols).map_or(true, |cells| cells > MAX_GRID_CELLS) {
        return Err(Error::TooManyCells {
            rows,
            cols,
            max: MAX_GRID_CELLS,
        });
    }

    let mut grid = MazeGrid::new();
    grid.resize(rows, cols)?;

    for (row, line) in lines.iter().enumerate() {
        let symbols = line.chars().chain(std::iter::repeat(PAD_SYMBOL)).take(cols);
        for (col, symbol) in symbols.enumerate() {
            grid.set(Position::new(row as i32, col as i32), symbol)?;
        }
    }

    if strict {
        grid.validate()?;
    }

    tracing::debug!("Loaded {}x{} maze", rows, cols);
    Ok(grid)
}

/// Read and parse a maze file.
pub fn load_maze_file(path: impl AsRef<Path>, strict: bool) -> Result<MazeGrid> {
    let path = path.as_ref();
    tracing::info!("Loading maze from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_maze(&text, strict)
}
