//! CSV benchmark report over a set of puzzle files.
//!
//! Layout, repeated per evaluation:
//!
//! ```text
//! displacement
//! file,time,minimalmoves
//! boards/puzzle04.txt,0,4
//! ```
//!
//! `time` is the solve duration in milliseconds; loading the file is not timed.
//! A path containing a comma, quote or line break is quoted as a CSV field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::evaluation::Evaluation;
use crate::persistence::load_puzzle;
use crate::solver::solve;

/// One solved puzzle in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReportRow {
    path: PathBuf,
    millis: u128,
    move_count: usize,
}

/// Solves each puzzle with each evaluation and writes the CSV report.
pub fn write_csv<W: Write>(
    mut writer: W,
    puzzles: &[PathBuf],
    evaluations: &[Evaluation],
) -> Result<()> {
    for &evaluation in evaluations {
        writeln!(writer, "{evaluation}")?;
        writeln!(writer, "file,time,minimalmoves")?;

        for path in puzzles {
            let row = measure(path, evaluation)?;
            writeln!(
                writer,
                "{},{},{}",
                csv_field(&row.path.display().to_string()),
                row.millis,
                row.move_count
            )?;
        }
    }

    writer.flush().context("Failed to flush report")?;
    Ok(())
}

/// Writes the CSV report to a file, creating parent directories as needed.
pub fn save_csv(output: &Path, puzzles: &[PathBuf], evaluations: &[Evaluation]) -> Result<()> {
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create report: {}", output.display()))?;
    write_csv(BufWriter::new(file), puzzles, evaluations)
        .with_context(|| format!("Failed to write report: {}", output.display()))
}

/// Quotes a field that would otherwise split or break the CSV line.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Loads and solves one puzzle, timing only the solve.
fn measure(path: &Path, evaluation: Evaluation) -> Result<ReportRow> {
    let grid = load_puzzle(path)?;

    let start = Instant::now();
    let solution = solve(&grid, evaluation)
        .with_context(|| format!("Failed to solve {}", path.display()))?;
    let millis = start.elapsed().as_millis();

    info!(
        "{} with {evaluation}: {} moves in {millis} ms",
        path.display(),
        solution.move_count()
    );

    Ok(ReportRow {
        path: path.to_path_buf(),
        millis,
        move_count: solution.move_count(),
    })
}
