use std::time::Instant;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;
use tracing::info;

use ndmaze::{Maze, MazeFlags};

#[derive(Parser)]
#[command(name = "ndmaze")]
#[command(about = "N-dimensional maze generation, solving, and file I/O")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a maze and optionally solve and save it.
    Generate {
        /// Comma-separated dimension sizes, e.g. "30,30" or "8,8,8".
        #[arg(long, value_delimiter = ',')]
        dims: Vec<u32>,

        /// Master seed for the PRNG.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of solver worker threads (clamped to [1, 1024]).
        #[arg(long, default_value_t = 1)]
        cores: usize,

        /// Optional "start,end" cell indices to solve immediately.
        #[arg(long, value_delimiter = ',')]
        solve: Vec<usize>,

        /// Where to write the resulting .maze file.
        #[arg(long)]
        output: Option<String>,

        /// Print a JSON summary (dims/totalCells/totalWalls/solutionLength) to stdout.
        #[arg(long, default_value_t = false)]
        describe: bool,
    },
    /// Load a maze file, solve it for new endpoints, and save it back out.
    Solve {
        #[arg(long)]
        input: String,

        #[arg(long, value_delimiter = ',')]
        solve: Vec<usize>,

        #[arg(long)]
        output: String,

        #[arg(long, default_value_t = 1)]
        cores: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Print a maze file's header/summary without materializing bitmaps.
    Inspect {
        #[arg(long)]
        input: String,
    },
}

#[derive(Serialize)]
struct MazeSummary {
    dims: Vec<u32>,
    total_cells: usize,
    total_walls: usize,
    solution_length: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match args.command {
        Command::Generate {
            dims,
            seed,
            cores,
            solve,
            output,
            describe,
        } => run_generate(&dims, seed, cores, &solve, output.as_deref(), describe),
        Command::Solve {
            input,
            solve,
            output,
            cores,
            seed,
        } => run_solve(&input, &solve, &output, cores, seed),
        Command::Inspect { input } => run_inspect(&input),
    }
}

fn run_generate(
    dims: &[u32],
    seed: u64,
    cores: usize,
    solve: &[usize],
    output: Option<&str>,
    describe: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    progress.set_message("generating...");

    let rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut maze = Maze::create(dims, MazeFlags::all(), rng)?;
    maze.set_cores(cores);
    maze.generate();

    info!(elapsed = ?start_time.elapsed(), "generation complete");

    if solve.len() == 2 {
        progress.set_message("solving...");
        maze.solve(solve[0], solve[1])?;
    }
    progress.finish_and_clear();

    if let Some(output) = output {
        maze.save(output)?;
        println!("Wrote {} ({} bytes)", output, std::fs::metadata(output)?.len());
    }

    if describe {
        print_summary(&maze)?;
    }

    println!("Completed in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn run_solve(
    input: &str,
    solve: &[usize],
    output: &str,
    cores: usize,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if solve.len() != 2 {
        return Err("--solve requires exactly two comma-separated cell indices".into());
    }

    let rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut maze = Maze::load_fresh(input, rng)?;
    maze.set_cores(cores);
    maze.solve(solve[0], solve[1])?;
    maze.save(output)?;

    println!(
        "Solved {} -> {}: path length {}",
        solve[0],
        solve[1],
        maze.solution_length()
    );
    Ok(())
}

fn run_inspect(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let maze = Maze::load_fresh(input, rng)?;
    print_summary(&maze)
}

fn print_summary(maze: &Maze) -> Result<(), Box<dyn std::error::Error>> {
    let summary = MazeSummary {
        dims: maze.dims().to_vec(),
        total_cells: maze.total_cells(),
        total_walls: maze.total_walls(),
        solution_length: maze.solution_length(),
    };
    serde_json::to_writer_pretty(std::io::stdout(), &summary)?;
    println!();
    Ok(())
}
