//! Sliding Tile Puzzle Solver
//!
//! Reads an N x N sliding tile puzzle (the side length followed by the tiles in
//! row-major order, 0 for the blank) and prints a minimum-length sequence of
//! boards leading to the solved arrangement.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use npuzzle::{persistence, report, solve, Error, Evaluation, Grid, Solution};

/// Solves sliding tile puzzles optimally.
#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print every board on the way.
    Solve {
        /// Puzzle file; reads stdin when omitted.
        file: Option<PathBuf>,

        /// Evaluation function: mismatch (hamming) or displacement (manhattan).
        #[arg(short, long, default_value_t = Evaluation::Displacement)]
        evaluation: Evaluation,
    },
    /// Print a puzzle's heuristics and whether it can be solved.
    Check {
        /// Puzzle file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Time the solver over several puzzles and write a CSV report.
    Report {
        /// Puzzle files to solve.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report destination.
        #[arg(short, long, default_value = "dataFile.csv")]
        output: PathBuf,

        /// Evaluation functions to report on; defaults to all of them.
        #[arg(short, long)]
        evaluation: Vec<Evaluation>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve { file, evaluation } => run_solve(file.as_deref(), evaluation),
        Command::Check { file } => run_check(file.as_deref()),
        Command::Report {
            files,
            output,
            evaluation,
        } => run_report(&files, &output, evaluation),
    }
}

/// Loads the puzzle from a file, or from stdin when no file is given.
fn load(file: Option<&Path>) -> Result<Grid> {
    match file {
        Some(path) => persistence::load_puzzle(path),
        None => persistence::read_puzzle(io::stdin().lock()),
    }
}

/// Solves the puzzle and prints the boards and the move count.
fn run_solve(file: Option<&Path>, evaluation: Evaluation) -> Result<()> {
    let grid = load(file)?;

    match solve(&grid, evaluation) {
        Ok(solution) => print!("{}", format_solution(&solution)),
        Err(Error::Unsolvable) => println!("No solution possible"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Prints the board with its heuristics and solvability.
fn run_check(file: Option<&Path>) -> Result<()> {
    let grid = load(file)?;
    print!("{}", format_check(&grid));
    Ok(())
}

/// Writes the CSV report.
fn run_report(files: &[PathBuf], output: &Path, evaluations: Vec<Evaluation>) -> Result<()> {
    let evaluations = if evaluations.is_empty() {
        Evaluation::ALL.to_vec()
    } else {
        evaluations
    };

    report::save_csv(output, files, &evaluations)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Every board of the solution separated by blank lines, then the move count.
fn format_solution(solution: &Solution) -> String {
    let mut output = String::new();
    for grid in solution.grids() {
        output.push_str(&grid.to_string());
        output.push('\n');
    }
    output.push_str(&format!("Minimum number of moves = {}\n", solution.move_count()));
    output
}

fn format_check(grid: &Grid) -> String {
    format!(
        "{grid}\nmismatch count = {}\ntotal displacement = {}\nsolvable = {}\n",
        grid.mismatch_count(),
        grid.total_displacement(),
        grid.is_solvable()
    )
}
