//! Host side of the maze runner: loading maze files, rendering them as
//! text, and driving the runner from `maze-core` to completion.

pub mod config;
pub mod error;
pub mod loader;
pub mod render;
pub mod simulation;

pub use config::RunnerConfig;
pub use error::{Error, Result};
pub use loader::{load_maze_file, parse_maze};
pub use render::render_ascii;
pub use simulation::{Frame, RunOutcome, RunReport, Simulation};

use maze_core::MazeGrid;

/// Load maze text and run it to completion.
///
/// Returns the run report together with the final grid, whose path cells
/// carry the marks the runner left behind.
///
/// # Example
/// ```
/// use maze_runner::{run_maze, RunOutcome, RunnerConfig};
///
/// let (report, _grid) = run_maze("*G*\n* *\n*S*\n", &RunnerConfig::default()).unwrap();
/// assert_eq!(report.outcome, RunOutcome::Finished);
/// ```
pub fn run_maze(text: &str, config: &RunnerConfig) -> Result<(RunReport, MazeGrid)> {
    let grid = parse_maze(text, config.strict)?;

    let mut simulation = Simulation::new(grid, config.clone())?;
    let report = simulation.run()?;
    Ok((report, simulation.into_grid()))
}
