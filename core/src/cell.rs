//! Cell encoding for the maze grid
//!
//! Every grid location holds one [`Cell`]. Path cells carry the number of
//! times the runner has departed from them; everything else is a door or a
//! wall.

use core::cmp::Ordering;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic state of a single grid location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", tag = "kind", content = "visits"))]
pub enum Cell {
    /// Impassable
    Wall,
    /// The entry door
    Start,
    /// The exit door
    Goal,
    /// Walkable cell with its visit count
    Path(u32),
}

impl Cell {
    /// Decode one maze-file symbol.
    ///
    /// Start and goal letters are case-insensitive. Digits seed a path with
    /// an initial visit count. Unknown symbols become walls.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '*' => Cell::Wall,
            'S' | 's' => Cell::Start,
            'G' | 'g' => Cell::Goal,
            ' ' => Cell::Path(0),
            '0'..='9' => Cell::Path(symbol as u32 - '0' as u32),
            _ => Cell::Wall,
        }
    }

    /// Encode back to a maze-file symbol.
    ///
    /// Visit counts above nine don't fit a single digit and render as `+`,
    /// which loads back as a wall.
    pub fn to_symbol(self) -> char {
        match self {
            Cell::Wall => '*',
            Cell::Start => 'S',
            Cell::Goal => 'G',
            Cell::Path(0) => ' ',
            Cell::Path(n @ 1..=9) => char::from(b'0' + n as u8),
            Cell::Path(_) => '+',
        }
    }

    pub fn is_path(self) -> bool {
        matches!(self, Cell::Path(_))
    }

    /// The mark used by the runner's move selection.
    pub fn mark(self) -> Mark {
        match self {
            Cell::Path(n) => Mark::Count(n),
            _ => Mark::Unreachable,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Path(0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Wall => write!(f, "wall"),
            Cell::Start => write!(f, "start"),
            Cell::Goal => write!(f, "goal"),
            Cell::Path(n) => write!(f, "path({})", n),
        }
    }
}

/// Visit mark of a neighbor as seen by the runner
///
/// Any counted mark orders strictly below `Unreachable`, so a wall, a door or
/// the world edge never wins a comparison against a real path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mark {
    Count(u32),
    Unreachable,
}

impl Mark {
    pub fn count(self) -> Option<u32> {
        match self {
            Mark::Count(n) => Some(n),
            Mark::Unreachable => None,
        }
    }
}

impl PartialOrd for Mark {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mark {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Mark::Count(a), Mark::Count(b)) => a.cmp(b),
            (Mark::Count(_), Mark::Unreachable) => Ordering::Less,
            (Mark::Unreachable, Mark::Count(_)) => Ordering::Greater,
            (Mark::Unreachable, Mark::Unreachable) => Ordering::Equal,
        }
    }
}
