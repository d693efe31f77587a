//! Reading puzzle definitions.
//!
//! Text format: the side length N followed by the N*N tiles in row-major
//! order, all separated by whitespace. Line breaks carry no meaning, so both
//!
//! ```text
//! 3
//! 0 1 3
//! 4 2 5
//! 7 8 6
//! ```
//!
//! and `3 0 1 3 4 2 5 7 8 6` describe the same grid.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::grid::Grid;

/// Parses a puzzle definition from text.
pub fn parse_puzzle(content: &str) -> Result<Grid> {
    let mut tokens = content.split_whitespace();

    let size_token = tokens.next().context("Puzzle definition is empty")?;
    let size: usize = size_token
        .parse()
        .with_context(|| format!("Invalid side length '{size_token}'"))?;

    let cell_count = size
        .checked_mul(size)
        .with_context(|| format!("Side length {size} is too large"))?;

    let mut tiles = Vec::with_capacity(cell_count.min(1 << 16));
    for position in 0..cell_count {
        let Some(token) = tokens.next() else {
            bail!(
                "Expected {cell_count} tiles for a {size}x{size} puzzle, found {position}"
            );
        };
        let tile: u16 = token
            .parse()
            .with_context(|| format!("Invalid tile '{token}' at position {position}"))?;
        tiles.push(tile);
    }

    if let Some(extra) = tokens.next() {
        bail!("Unexpected trailing token '{extra}' after {cell_count} tiles");
    }

    Ok(Grid::from_flat(size, tiles)?)
}

/// Reads and parses a puzzle definition from any reader.
pub fn read_puzzle<R: Read>(mut reader: R) -> Result<Grid> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read puzzle definition")?;
    parse_puzzle(&content)
}

/// Loads a puzzle definition from a file.
pub fn load_puzzle<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open puzzle file: {}", path.display()))?;
    read_puzzle(BufReader::new(file))
        .with_context(|| format!("Failed to load puzzle from: {}", path.display()))
}
