use thiserror::Error;

use crate::Position;

/// Failures reported by the grid and the runner
///
/// None of these are fatal; a caller can load another maze and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze grid used before resize")]
    NotResized,

    #[error("invalid maze dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("no start door found")]
    NoStartFound,

    #[error("no goal door found")]
    NoGoalFound,

    #[error("maze has {count} start doors, expected one")]
    MultipleStarts { count: usize },

    #[error("maze has {count} goal doors, expected one")]
    MultipleGoals { count: usize },

    #[error("cell {0} is not a path")]
    NotAPath(Position),

    #[error("cell {0} above the start door is not a path")]
    EntryBlocked(Position),

    #[error("runner is already placed")]
    AlreadyPlaced,

    #[error("runner stepped before being placed at the start")]
    StepOnUnplaced,
}
