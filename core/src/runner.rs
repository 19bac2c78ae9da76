//! The maze runner: a greedy walker that only looks one cell ahead
//!
//! Each tick the runner checks its four neighbors in [`Direction::PRIORITY`]
//! order. A neighboring goal door ends the walk. Otherwise it moves to the
//! path neighbor with the fewest visit marks (earlier directions win ties) and
//! leaves one more mark on the cell it vacated. Revisited cells grow less
//! attractive, which is what eventually pushes the runner out of dead ends.
//!
//! There is no termination guarantee on mazes with cycles; drivers bound the
//! number of ticks.

use crate::{Cell, Direction, Mark, MazeError, MazeGrid, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RunnerState {
    Unplaced,
    Placed,
    Finished,
    Stuck,
}

impl RunnerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunnerState::Finished | RunnerState::Stuck)
    }
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepOutcome {
    /// Moved one cell in the given direction
    Moved(Direction),
    /// A goal door is adjacent; the walk is over
    Finished,
    /// No path neighbor to move to; the walk is over
    Stuck,
}

/// Decide the next move from `from` without touching the grid.
///
/// Direction D is chosen when its neighbor is a path and its mark is no
/// larger than the marks of the other three neighbors. Walls, doors and the
/// world edge count as [`Mark::Unreachable`].
pub fn select_move(grid: &MazeGrid, from: Position) -> Result<StepOutcome, MazeError> {
    let neighbors = from.neighbors();

    for (_, at) in neighbors {
        if grid.contents(at)? == Cell::Goal {
            return Ok(StepOutcome::Finished);
        }
    }

    let mut marks = [Mark::Unreachable; 4];
    for (slot, (_, at)) in marks.iter_mut().zip(neighbors) {
        *slot = grid.mark_count(at)?;
    }

    for (i, (direction, at)) in neighbors.into_iter().enumerate() {
        if !grid.is_traversable(at)? {
            continue;
        }
        let chosen = marks
            .iter()
            .enumerate()
            .all(|(j, other)| j == i || marks[i] <= *other);
        if chosen {
            return Ok(StepOutcome::Moved(direction));
        }
    }

    Ok(StepOutcome::Stuck)
}

#[derive(Debug, Clone)]
pub struct RunnerAgent {
    position: Option<Position>,
    state: RunnerState,
    steps: u64,
}

impl Default for RunnerAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerAgent {
    pub fn new() -> Self {
        Self {
            position: None,
            state: RunnerState::Unplaced,
            steps: 0,
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Number of moves made so far
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Put the runner on the path cell directly above the start door.
    ///
    /// The start door sits in the outer wall, so the cell above it is the
    /// first interior cell. If that cell isn't a path the runner stays
    /// unplaced.
    pub fn place_at_start(&mut self, grid: &MazeGrid) -> Result<Position, MazeError> {
        if self.state != RunnerState::Unplaced {
            return Err(MazeError::AlreadyPlaced);
        }

        let start = grid.locate_start()?;
        let entry = start.offset(Direction::Up);
        if !grid.is_traversable(entry)? {
            return Err(MazeError::EntryBlocked(entry));
        }

        self.position = Some(entry);
        self.state = RunnerState::Placed;
        tracing::debug!("Runner placed at {} (start door at {})", entry, start);
        Ok(entry)
    }

    /// Advance the runner by one tick.
    ///
    /// After the walk has finished or got stuck, further calls repeat that
    /// outcome without touching the grid.
    pub fn step(&mut self, grid: &mut MazeGrid) -> Result<StepOutcome, MazeError> {
        let current = match (self.state, self.position) {
            (RunnerState::Finished, _) => return Ok(StepOutcome::Finished),
            (RunnerState::Stuck, _) => return Ok(StepOutcome::Stuck),
            (RunnerState::Placed, Some(current)) => current,
            _ => return Err(MazeError::StepOnUnplaced),
        };

        let outcome = select_move(grid, current)?;
        match outcome {
            StepOutcome::Moved(direction) => {
                grid.increment_mark(current)?;
                let next = current.offset(direction);
                self.position = Some(next);
                self.steps += 1;
                tracing::trace!("Step {}: {} -> {} ({})", self.steps, current, next, direction);
            }
            StepOutcome::Finished => {
                self.state = RunnerState::Finished;
                tracing::debug!("Runner reached the goal from {} after {} moves", current, self.steps);
            }
            StepOutcome::Stuck => {
                self.state = RunnerState::Stuck;
                tracing::debug!("Runner stuck at {} after {} moves", current, self.steps);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> MazeGrid {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap();
        let mut grid = MazeGrid::new();
        grid.resize(rows.len(), cols).unwrap();
        for (r, line) in rows.iter().enumerate() {
            for (c, symbol) in line.chars().enumerate() {
                grid.set(Position::new(r as i32, c as i32), symbol).unwrap();
            }
        }
        grid
    }

    fn placed(grid: &MazeGrid) -> RunnerAgent {
        let mut runner = RunnerAgent::new();
        runner.place_at_start(grid).unwrap();
        runner
    }

    const CORRIDOR: &[&str] = &["***", "*G*", "* *", "* *", "* *", "*S*", "***"];

    const DEAD_END: &[&str] = &["*****", "*G* *", "*   *", "** **", "**S**"];

    #[test]
    fn test_place_at_start_enters_above_door() {
        let grid = grid_from(CORRIDOR);
        let start = grid.locate_start().unwrap();
        let mut runner = RunnerAgent::new();

        assert_eq!(runner.state(), RunnerState::Unplaced);
        let entry = runner.place_at_start(&grid).unwrap();

        assert_eq!(entry, Position::new(start.row - 1, start.col));
        assert_eq!(runner.position(), Some(entry));
        assert_eq!(runner.state(), RunnerState::Placed);
    }

    #[test]
    fn test_place_without_start_stays_unplaced() {
        let grid = grid_from(&["***", "*G*", "* *", "***"]);
        let mut runner = RunnerAgent::new();

        assert_eq!(runner.place_at_start(&grid), Err(MazeError::NoStartFound));
        assert_eq!(runner.state(), RunnerState::Unplaced);
        assert_eq!(runner.position(), None);
    }

    #[test]
    fn test_place_with_blocked_entry_fails() {
        let top_row = grid_from(&["*S*", "* *", "*G*"]);
        let walled = grid_from(&["*G*", "***", "*S*"]);

        let mut runner = RunnerAgent::new();
        assert_eq!(
            runner.place_at_start(&top_row),
            Err(MazeError::EntryBlocked(Position::new(-1, 1)))
        );
        assert_eq!(
            runner.place_at_start(&walled),
            Err(MazeError::EntryBlocked(Position::new(1, 1)))
        );
        assert_eq!(runner.state(), RunnerState::Unplaced);
    }

    #[test]
    fn test_place_twice_is_rejected() {
        let grid = grid_from(CORRIDOR);
        let mut runner = placed(&grid);
        assert_eq!(runner.place_at_start(&grid), Err(MazeError::AlreadyPlaced));
    }

    #[test]
    fn test_step_before_place_fails() {
        let mut grid = grid_from(CORRIDOR);
        let mut runner = RunnerAgent::new();
        assert_eq!(runner.step(&mut grid), Err(MazeError::StepOnUnplaced));
    }

    #[test]
    fn test_corridor_reaches_goal() {
        let mut grid = grid_from(CORRIDOR);
        let mut runner = placed(&grid);

        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Moved(Direction::Up)));
        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Moved(Direction::Up)));
        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Finished));

        assert_eq!(runner.position(), Some(Position::new(2, 1)));
        assert_eq!(runner.state(), RunnerState::Finished);
        assert_eq!(runner.steps_taken(), 2);
        assert_eq!(grid.contents(Position::new(4, 1)), Ok(Cell::Path(1)));
        assert_eq!(grid.contents(Position::new(3, 1)), Ok(Cell::Path(1)));
        assert_eq!(grid.contents(Position::new(2, 1)), Ok(Cell::Path(0)));
    }

    #[test]
    fn test_goal_adjacent_does_not_mutate() {
        let mut grid = grid_from(&["*G*", "* *", "*S*"]);
        let mut runner = placed(&grid);
        let before = grid.clone();

        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Finished));
        assert_eq!(runner.position(), Some(Position::new(1, 1)));
        assert_eq!(grid, before);

        // Terminal: repeating the call changes nothing.
        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Finished));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_goal_beats_open_paths() {
        let mut grid = grid_from(&["*****", "*  G*", "** **", "**S**"]);
        let mut runner = placed(&grid);

        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Moved(Direction::Up)));
        // Right is the goal; the open left cell is never considered.
        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Finished));
    }

    #[test]
    fn test_enclosed_cell_is_stuck() {
        let mut grid = grid_from(&["***", "* *", "*S*"]);
        let mut runner = placed(&grid);
        let before = grid.clone();

        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Stuck));
        assert_eq!(runner.position(), Some(Position::new(1, 1)));
        assert_eq!(runner.state(), RunnerState::Stuck);
        assert_eq!(grid, before);

        assert_eq!(runner.step(&mut grid), Ok(StepOutcome::Stuck));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_tie_break_follows_priority() {
        let mut grid = grid_from(&["*1*", "1 1", "*1*"]);
        let center = Position::new(1, 1);

        assert_eq!(select_move(&grid, center), Ok(StepOutcome::Moved(Direction::Down)));

        grid.set(Position::new(2, 1), '2').unwrap();
        assert_eq!(select_move(&grid, center), Ok(StepOutcome::Moved(Direction::Right)));

        grid.set(Position::new(1, 2), '2').unwrap();
        assert_eq!(select_move(&grid, center), Ok(StepOutcome::Moved(Direction::Up)));

        grid.set(Position::new(0, 1), '2').unwrap();
        assert_eq!(select_move(&grid, center), Ok(StepOutcome::Moved(Direction::Left)));
    }

    #[test]
    fn test_least_visited_neighbor_wins() {
        let grid = grid_from(&["*5*", "4 3", "*6*"]);
        assert_eq!(
            select_move(&grid, Position::new(1, 1)),
            Ok(StepOutcome::Moved(Direction::Right))
        );
    }

    #[test]
    fn test_select_move_treats_edge_as_wall() {
        let grid = grid_from(&["  "]);
        assert_eq!(
            select_move(&grid, Position::new(0, 0)),
            Ok(StepOutcome::Moved(Direction::Right))
        );
        assert_eq!(
            select_move(&grid, Position::new(0, 1)),
            Ok(StepOutcome::Moved(Direction::Left))
        );
    }

    #[test]
    fn test_select_move_far_outside_grid() {
        let grid = grid_from(&["  "]);
        for at in [
            Position::new(i32::MAX, 0),
            Position::new(0, i32::MAX),
            Position::new(i32::MIN, i32::MIN),
        ] {
            assert_eq!(select_move(&grid, at), Ok(StepOutcome::Stuck), "at {}", at);
        }
    }

    #[test]
    fn test_runner_backs_out_of_dead_end() {
        let mut grid = grid_from(DEAD_END);
        let mut runner = placed(&grid);

        let mut moves = Vec::new();
        let finished = loop {
            match runner.step(&mut grid).unwrap() {
                StepOutcome::Moved(direction) => moves.push(direction),
                StepOutcome::Finished => break true,
                StepOutcome::Stuck => break false,
            }
            assert!(moves.len() < 50, "runner did not terminate");
        };

        assert!(finished);
        use Direction::*;
        assert_eq!(moves, vec![Up, Right, Up, Down, Up, Down, Left, Left]);
        assert_eq!(grid.total_marks(), moves.len() as u64);
        assert_eq!(runner.position(), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_each_move_adds_exactly_one_mark() {
        let mut grid = grid_from(DEAD_END);
        let mut runner = placed(&grid);

        loop {
            let before = runner.position().unwrap();
            let vacated = grid.mark_count(before).unwrap();
            let marks_before = grid.total_marks();

            match runner.step(&mut grid).unwrap() {
                StepOutcome::Moved(direction) => {
                    let after = runner.position().unwrap();
                    assert_eq!(after, before.offset(direction));
                    assert_eq!(grid.total_marks(), marks_before + 1);
                    let bumped = vacated.count().map(|n| n + 1).map(Mark::Count);
                    assert_eq!(Some(grid.mark_count(before).unwrap()), bumped);
                }
                _ => break,
            }
        }
    }
}
