//! Runner settings with environment overrides

use serde::{Deserialize, Serialize};

/// Upper bound on moves in a single run. The runner has no termination
/// guarantee on mazes with loops.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

pub const ENV_MAX_STEPS: &str = "MAZE_RUNNER_MAX_STEPS";
pub const ENV_DELAY_MS: &str = "MAZE_RUNNER_DELAY_MS";
pub const ENV_STRICT: &str = "MAZE_RUNNER_STRICT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Stop after this many moves
    pub max_steps: u64,
    /// Pause between ticks, for animation
    pub delay_ms: u64,
    /// Require exactly one start and one goal door when loading
    pub strict: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            delay_ms: 0,
            strict: true,
        }
    }
}

impl RunnerConfig {
    /// Defaults overridden by `MAZE_RUNNER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Unparseable values
    /// are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_STEPS) {
            match value.trim().parse() {
                Ok(max_steps) => config.max_steps = max_steps,
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_MAX_STEPS, value),
            }
        }

        if let Some(value) = lookup(ENV_DELAY_MS) {
            match value.trim().parse() {
                Ok(delay_ms) => config.delay_ms = delay_ms,
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_DELAY_MS, value),
            }
        }

        if let Some(value) = lookup(ENV_STRICT) {
            match parse_flag(&value) {
                Some(strict) => config.strict = strict,
                None => tracing::warn!("Ignoring invalid {}={:?}", ENV_STRICT, value),
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
