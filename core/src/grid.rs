//! Two-dimensional cell storage with bounds-safe queries
//!
//! A [`MazeGrid`] starts out unsized. Once the real dimensions of a maze are
//! known it is resized, every cell becomes an unvisited path, and the loader
//! writes one symbol per location. From then on the runner reads neighbor
//! contents and bumps visit counts through the methods here.
//!
//! Coordinates outside the grid behave like an implicit wall: reads return
//! [`Cell::Wall`] and writes are dropped. Any access before [`MazeGrid::resize`]
//! is reported as [`MazeError::NotResized`].

use crate::{Cell, Mark, MazeError, Position, MAX_GRID_CELLS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MazeGrid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl MazeGrid {
    /// An empty grid. Storage is allocated by [`MazeGrid::resize`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `rows x cols` unvisited path cells.
    ///
    /// Resizing a grid that already holds a maze discards it. Areas above
    /// [`MAX_GRID_CELLS`] are rejected before anything is allocated.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), MazeError> {
        if rows == 0 || cols == 0 || rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len <= MAX_GRID_CELLS)
            .ok_or(MazeError::InvalidDimensions { rows, cols })?;

        self.cells = vec![Cell::Path(0); len];
        self.rows = rows;
        self.cols = cols;
        tracing::debug!("Resized maze grid to {}x{}", rows, cols);
        Ok(())
    }

    pub fn is_resized(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Write one maze-file symbol. Out-of-bounds writes are ignored.
    pub fn set(&mut self, at: Position, symbol: char) -> Result<(), MazeError> {
        self.set_cell(at, Cell::from_symbol(symbol))
    }

    /// Write a cell directly. Out-of-bounds writes are ignored.
    pub fn set_cell(&mut self, at: Position, cell: Cell) -> Result<(), MazeError> {
        self.ensure_resized()?;
        if let Some(idx) = self.idx(at) {
            self.cells[idx] = cell;
        }
        Ok(())
    }

    /// Cell at `at`, or a wall beyond the edge.
    pub fn contents(&self, at: Position) -> Result<Cell, MazeError> {
        self.ensure_resized()?;
        Ok(self.idx(at).map(|idx| self.cells[idx]).unwrap_or(Cell::Wall))
    }

    pub fn mark_count(&self, at: Position) -> Result<Mark, MazeError> {
        Ok(self.contents(at)?.mark())
    }

    /// Only path cells can be walked on; doors end or begin a run.
    pub fn is_traversable(&self, at: Position) -> Result<bool, MazeError> {
        Ok(self.contents(at)?.is_path())
    }

    /// Record one more departure from the path cell at `at`.
    pub fn increment_mark(&mut self, at: Position) -> Result<(), MazeError> {
        self.ensure_resized()?;
        let idx = self.idx(at).ok_or(MazeError::NotAPath(at))?;
        match &mut self.cells[idx] {
            Cell::Path(visits) => {
                *visits = visits.saturating_add(1);
                Ok(())
            }
            _ => Err(MazeError::NotAPath(at)),
        }
    }

    /// Row-major scan for the start door.
    ///
    /// Malformed mazes with several start doors yield the last one scanned.
    pub fn locate_start(&self) -> Result<Position, MazeError> {
        self.ensure_resized()?;
        self.locate_last(Cell::Start).ok_or(MazeError::NoStartFound)
    }

    /// Row-major scan for the goal door, last match wins.
    pub fn locate_goal(&self) -> Result<Position, MazeError> {
        self.ensure_resized()?;
        self.locate_last(Cell::Goal).ok_or(MazeError::NoGoalFound)
    }

    /// Check that the maze has exactly one start and one goal door.
    pub fn validate(&self) -> Result<(), MazeError> {
        self.ensure_resized()?;
        match self.count(Cell::Start) {
            0 => return Err(MazeError::NoStartFound),
            1 => {}
            count => return Err(MazeError::MultipleStarts { count }),
        }
        match self.count(Cell::Goal) {
            0 => Err(MazeError::NoGoalFound),
            1 => Ok(()),
            count => Err(MazeError::MultipleGoals { count }),
        }
    }

    /// Sum of visit counts over all path cells.
    pub fn total_marks(&self) -> u64 {
        self.cells
            .iter()
            .filter_map(|cell| cell.mark().count())
            .map(u64::from)
            .sum()
    }

    /// Read-only rows for renderers. Empty before resize.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    fn ensure_resized(&self) -> Result<(), MazeError> {
        if self.is_resized() {
            Ok(())
        } else {
            Err(MazeError::NotResized)
        }
    }

    fn idx(&self, at: Position) -> Option<usize> {
        if at.row < 0 || at.col < 0 {
            return None;
        }
        let (row, col) = (at.row as usize, at.col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    fn position_of(&self, idx: usize) -> Position {
        Position::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    fn locate_last(&self, wanted: Cell) -> Option<Position> {
        self.cells
            .iter()
            .rposition(|&cell| cell == wanted)
            .map(|idx| self.position_of(idx))
    }

    fn count(&self, wanted: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == wanted).count()
    }
}
