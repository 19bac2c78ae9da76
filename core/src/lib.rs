//! Maze model and runner for the maze runner system
//!
//! This crate holds the only non-trivial logic of the system: the typed
//! cell grid a maze is loaded into, and the greedy runner that walks it one
//! tick at a time using nothing but its four neighbors' visit marks.
//!
//! Loading maze files, drawing the grid and driving the runner live in the
//! `maze-runner` host crate.

#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod position;
pub mod runner;

// Re-export commonly used types for convenience
pub use cell::{Cell, Mark};
pub use error::MazeError;
pub use grid::MazeGrid;
pub use position::{Direction, Position};
pub use runner::{select_move, RunnerAgent, RunnerState, StepOutcome};

/// Largest grid area accepted by [`MazeGrid::resize`]
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Symbol for an impassable cell in maze files
pub const WALL_SYMBOL: char = '*';

/// Symbol used when padding short rows of a maze file
pub const PAD_SYMBOL: char = WALL_SYMBOL;
