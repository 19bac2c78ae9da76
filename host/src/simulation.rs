//! Driver that ticks the runner until the walk ends
//!
//! A [`Simulation`] owns the grid and the runner for one run. Observers get a
//! read-only [`Frame`] after every tick, which is how the CLI animates.

use std::thread;
use std::time::Duration;

use maze_core::{select_move, MazeError, MazeGrid, Position, RunnerAgent, StepOutcome};
use serde::{Deserialize, Serialize};

use crate::{Result, RunnerConfig};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The runner stood next to the goal door
    Finished,
    /// The runner had no path neighbor
    Stuck,
    /// `max_steps` moves were made without finishing
    StepLimit,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Finished => write!(f, "finished"),
            RunOutcome::Stuck => write!(f, "stuck"),
            RunOutcome::StepLimit => write!(f, "step limit"),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Number of moves made
    pub steps: u64,
    /// Cell the runner entered on, above the start door
    pub start: Position,
    pub final_position: Position,
    /// Every cell occupied, starting with `start`
    pub path: Vec<Position>,
    /// Sum of visit marks left on the grid, including any preloaded ones
    pub total_marks: u64,
}

/// Snapshot handed to observers after each tick
pub struct Frame<'a> {
    pub tick: u64,
    pub outcome: StepOutcome,
    pub runner: Position,
    pub grid: &'a MazeGrid,
}

pub struct Simulation {
    grid: MazeGrid,
    runner: RunnerAgent,
    config: RunnerConfig,
}

impl Simulation {
    /// Take ownership of a loaded grid and place the runner at its start.
    pub fn new(grid: MazeGrid, config: RunnerConfig) -> Result<Self> {
        let mut runner = RunnerAgent::new();
        runner.place_at_start(&grid)?;
        Ok(Self {
            grid,
            runner,
            config,
        })
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn runner(&self) -> &RunnerAgent {
        &self.runner
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn into_grid(self) -> MazeGrid {
        self.grid
    }

    /// One tick of the runner.
    pub fn tick(&mut self) -> Result<StepOutcome> {
        Ok(self.runner.step(&mut self.grid)?)
    }

    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Tick until the runner finishes, gets stuck or hits the step limit,
    /// calling `observer` after every tick.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunReport>
    where
        F: FnMut(&Frame<'_>),
    {
        let start = self.current_position()?;
        let mut path = vec![start];
        let mut tick = 0;
        let delay = Duration::from_millis(self.config.delay_ms);

        tracing::info!(
            "Running maze from {} (max {} steps)",
            start,
            self.config.max_steps
        );

        let outcome = loop {
            // The limit bounds moves only; finishing or getting stuck is free.
            if self.runner.steps_taken() >= self.config.max_steps
                && !self.runner.state().is_terminal()
                && matches!(
                    select_move(&self.grid, self.current_position()?)?,
                    StepOutcome::Moved(_)
                )
            {
                tracing::warn!("Step limit of {} reached", self.config.max_steps);
                break RunOutcome::StepLimit;
            }

            let step = self.tick()?;
            tick += 1;
            let position = self.current_position()?;
            observer(&Frame {
                tick,
                outcome: step,
                runner: position,
                grid: &self.grid,
            });

            match step {
                StepOutcome::Moved(_) => path.push(position),
                StepOutcome::Finished => break RunOutcome::Finished,
                StepOutcome::Stuck => break RunOutcome::Stuck,
            }

            if !delay.is_zero() {
                thread::sleep(delay);
            }
        };

        let report = RunReport {
            outcome,
            steps: self.runner.steps_taken(),
            start,
            final_position: self.current_position()?,
            path,
            total_marks: self.grid.total_marks(),
        };

        tracing::info!(
            "Run {} after {} steps at {}",
            report.outcome,
            report.steps,
            report.final_position
        );
        Ok(report)
    }

    fn current_position(&self) -> Result<Position> {
        Ok(self.runner.position().ok_or(MazeError::StepOnUnplaced)?)
    }
}
