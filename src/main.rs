//! Kanoodle Puzzle Solver
//!
//! Solves the 11x5 Kanoodle board, or any board described by a JSON puzzle
//! definition, where every piece must be placed exactly once so that every
//! cell is covered. Pieces can be pinned to fixed placements to explore the
//! solutions that include them.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use kanoodle::config::PuzzleConfig;
use kanoodle::export::SolutionReport;
use kanoodle::grid::format_report;
use kanoodle::{Pin, PuzzleError};

/// Solves polyomino tiling puzzles with Dancing Links.
#[derive(Parser)]
#[command(name = "kanoodle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON puzzle definition; defaults to the built-in Kanoodle board.
    #[arg(long, global = true)]
    puzzle: Option<PathBuf>,

    /// Pin a piece: SYMBOL,ROTATION,FLIP,COL,ROW (e.g. A,90,false,0,0).
    #[arg(long = "pin", global = true)]
    pins: Vec<Pin>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first solution found.
    Solve,
    /// Print every solution. Unpinned full boards take a very long time.
    All,
    /// Print the number of solutions.
    Count,
    /// Write every solution as a JSON report.
    ExportJson {
        /// Output file; defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PuzzleError> {
    let mut config = match &cli.puzzle {
        Some(path) => PuzzleConfig::from_path(path)?,
        None => PuzzleConfig::kanoodle(),
    };
    config.pins.extend(cli.pins);

    let puzzle = config.to_puzzle()?;
    let pins = &config.pins;

    match cli.command.unwrap_or(Command::Solve) {
        Command::Solve => match puzzle.solve_first_grid(pins)? {
            Some(grid) => print!("{grid}"),
            None => println!("No solution found"),
        },
        Command::All => {
            let solutions = puzzle.solve_all(pins)?;
            print!("{}", format_report(&solutions, puzzle.grid));
        }
        Command::Count => {
            println!("{} solutions", puzzle.count_solutions(pins)?);
        }
        Command::ExportJson { output } => {
            let report = SolutionReport::new(&puzzle.solve_all(pins)?);
            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|source| PuzzleError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    report.write_to(BufWriter::new(file))?;
                    println!("Wrote {} solutions to {}", report.count, path.display());
                }
                None => {
                    report.write_to(io::stdout().lock())?;
                    println!();
                }
            }
        }
    }

    Ok(())
}
