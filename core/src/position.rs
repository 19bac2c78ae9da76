//! Grid coordinates and the four movement directions

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A (row, col) location. Signed so that neighbors of edge cells can be
/// named and then rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// One unit along `direction`.
    ///
    /// Saturates at the `i32` range. A saturated coordinate is never inside
    /// a grid, so it reads as the implicit wall beyond the edge.
    pub fn offset(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// The four orthogonal neighbors in priority order.
    pub fn neighbors(self) -> [(Direction, Position); 4] {
        Direction::PRIORITY.map(|d| (d, self.offset(d)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unit moves on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Evaluation order of the runner. When two neighbors carry the same
    /// mark, the one listed first wins.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// (row delta, col delta)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
