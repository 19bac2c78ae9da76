use maze_core::MazeError;
use thiserror::Error;

/// Errors from loading, running and reporting on a maze
#[derive(Debug, Error)]
pub enum Error {
    #[error("maze text is empty")]
    EmptyMaze,

    #[error("maze file is too large: {bytes} bytes (max {max})")]
    TooLarge { bytes: usize, max: usize },

    #[error("maze is too large: {rows}x{cols} cells (max {max})")]
    TooManyCells { rows: usize, cols: usize, max: usize },

    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
