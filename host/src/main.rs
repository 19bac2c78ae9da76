use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use maze_runner::{load_maze_file, render_ascii, RunOutcome, RunReport, RunnerConfig, Simulation};

#[derive(Debug, Parser)]
#[command(name = "maze-runner", version, about = "Greedy maze runner that leaves marks behind it")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the maze runner on a maze file
    Run {
        /// Text file with one maze row per line
        maze_file: PathBuf,
        /// Stop after this many moves (default: $MAZE_RUNNER_MAX_STEPS or 10000)
        #[arg(long)]
        max_steps: Option<u64>,
        /// Pause between ticks in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Redraw the maze after every tick
        #[arg(long)]
        animate: bool,
        /// Accept mazes without exactly one start and one goal door
        #[arg(long)]
        lenient: bool,
        /// Save the run report as JSON
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a maze file as loaded
    Render {
        maze_file: PathBuf,
        #[arg(long)]
        lenient: bool,
    },
    /// Validate a maze file and show its doors
    Check { maze_file: PathBuf },
}

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            maze_file,
            max_steps,
            delay_ms,
            animate,
            lenient,
            output,
        } => {
            let mut config = RunnerConfig::from_env();
            if let Some(max_steps) = max_steps {
                config.max_steps = max_steps;
            }
            if let Some(delay_ms) = delay_ms {
                config.delay_ms = delay_ms;
            }
            if lenient {
                config.strict = false;
            }
            run_command(&maze_file, config, animate, output.as_deref())
        }
        Command::Render { maze_file, lenient } => render_command(&maze_file, !lenient),
        Command::Check { maze_file } => check_command(&maze_file),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("❌ Error: {}", e);
        eprintln!("{}", "=".repeat(70));
        std::process::exit(1);
    }
}

fn run_command(
    maze_file: &Path,
    config: RunnerConfig,
    animate: bool,
    output_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🏃 Maze Runner");
    println!("{}", "=".repeat(70));
    println!("  Maze file: {}", maze_file.display());
    println!("  Max steps: {}", config.max_steps);
    if config.delay_ms > 0 {
        println!("  Delay: {} ms", config.delay_ms);
    }
    println!();

    let grid = load_maze_file(maze_file, config.strict)?;
    println!("📦 Loaded {}x{} maze", grid.rows(), grid.cols());

    let mut simulation = Simulation::new(grid, config)?;
    let start = Instant::now();

    let report = if animate {
        simulation.run_with(|frame| {
            print!("{esc}[2J{esc}[H", esc = 27 as char);
            println!("Tick {} ({:?})", frame.tick, frame.outcome);
            print!("{}", render_ascii(frame.grid, Some(frame.runner)));
        })?
    } else {
        simulation.run()?
    };

    let duration = start.elapsed();
    println!();
    print!("{}", render_ascii(simulation.grid(), Some(report.final_position)));
    println!();
    print_report(&report);
    println!("  Run time: {:.3}s", duration.as_secs_f64());

    if let Some(path) = output_file {
        save_report(&report, path)?;
        println!();
        println!("💾 Run report saved to: {}", path.display());
    }

    println!("{}", "=".repeat(70));
    Ok(())
}

fn print_report(report: &RunReport) {
    match report.outcome {
        RunOutcome::Finished => println!("✅ Reached the goal!"),
        RunOutcome::Stuck => println!("🧱 Runner is walled in"),
        RunOutcome::StepLimit => println!("⏱️  Gave up at the step limit"),
    }
    println!("  Steps: {}", report.steps);
    println!("  Entered at: {}", report.start);
    println!("  Final position: {}", report.final_position);
    println!("  Marks left: {}", report.total_marks);
}

fn render_command(maze_file: &Path, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let grid = load_maze_file(maze_file, strict)?;
    print!("{}", render_ascii(&grid, None));
    Ok(())
}

fn check_command(maze_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("📋 Checking maze");
    println!("  Maze file: {}", maze_file.display());
    println!();

    let grid = load_maze_file(maze_file, false)?;
    println!("  Size: {}x{} cells", grid.rows(), grid.cols());
    grid.validate()?;

    let start = grid.locate_start()?;
    let goal = grid.locate_goal()?;
    println!("  Start door: {}", start);
    println!("  Goal door: {}", goal);

    // Placing a runner also checks the cell above the start door.
    Simulation::new(grid, RunnerConfig::default())?;

    println!();
    println!("✅ Maze is well-formed");
    Ok(())
}

fn save_report(report: &RunReport, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
