//! Grid representation and operations for sliding tile puzzles.
//!
//! A grid is an N x N arrangement stored as a flat row-major array where each
//! cell holds a tile number, or 0 for the blank. The goal arrangement lists the
//! tiles 1..N*N-1 in row-major order with the blank in the bottom-right corner.
//!
//! Grids are immutable values: every slide copies the tiles into a new grid, so
//! structural equality and hashing stay valid for the lifetime of a search.

use std::fmt;

use crate::error::{Error, Result};

/// Tile value of the blank cell.
pub const BLANK: u16 = 0;

/// Largest supported side length, so that every tile value fits in a `u16`.
pub const MAX_SIZE: usize = 255;

/// Direction the blank travels during a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions, in the order `Grid::neighbors` tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Returns the direction that undoes this one.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// Row and column offsets of the blank.
    const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// An immutable square arrangement of tiles with exactly one blank.
///
/// `blank` is derived from `tiles`, so the derived `Eq` and `Hash` agree with
/// element-wise equality of the tiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    tiles: Box<[u16]>,
    blank: usize,
}

impl Grid {
    /// Builds a grid from a square matrix of rows, copying the tiles.
    ///
    /// Fails with `Error::InvalidShape` when the matrix is empty, not square,
    /// or does not hold every value in `0..N*N` exactly once.
    pub fn new<R: AsRef<[u16]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::InvalidShape("matrix has no rows".to_string()));
        }
        if size > MAX_SIZE {
            return Err(Error::InvalidShape(format!(
                "{size} rows exceed the maximum side length of {MAX_SIZE}"
            )));
        }

        let mut tiles = Vec::with_capacity(size * size);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(Error::InvalidShape(format!(
                    "row {} has {} tiles, expected {} for a square matrix",
                    row_index,
                    row.len(),
                    size
                )));
            }
            tiles.extend_from_slice(row);
        }

        Self::from_flat(size, tiles)
    }

    /// Builds a grid from row-major tiles and a side length.
    pub fn from_flat(size: usize, tiles: Vec<u16>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidShape("side length must be positive".to_string()));
        }
        if size > MAX_SIZE {
            return Err(Error::InvalidShape(format!(
                "side length {size} exceeds the maximum of {MAX_SIZE}"
            )));
        }
        if tiles.len() != size * size {
            return Err(Error::InvalidShape(format!(
                "{} tiles cannot fill a {size}x{size} grid",
                tiles.len()
            )));
        }

        // every value in 0..N*N must appear exactly once
        let mut seen = vec![false; tiles.len()];
        for &tile in &tiles {
            let value = tile as usize;
            if value >= seen.len() {
                return Err(Error::InvalidShape(format!(
                    "tile {tile} is out of range for a {size}x{size} grid"
                )));
            }
            if seen[value] {
                return Err(Error::InvalidShape(format!("tile {tile} appears more than once")));
            }
            seen[value] = true;
        }

        // the permutation check above guarantees a blank exists
        let blank = tiles.iter().position(|&tile| tile == BLANK).unwrap_or_default();

        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
            blank,
        })
    }

    /// Returns the goal arrangement for the given side length.
    pub fn solved(size: usize) -> Result<Self> {
        let cell_count = size * size;
        let tiles = (1..cell_count)
            .map(|value| value as u16)
            .chain(std::iter::once(BLANK))
            .collect();
        Self::from_flat(size, tiles)
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Tile at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        assert!(row < self.size && col < self.size, "({row}, {col}) is outside the grid");
        self.tiles[row * self.size + col]
    }

    /// Row and column of the blank.
    #[inline]
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Row and column where a non-blank tile sits in the goal arrangement.
    #[inline(always)]
    fn goal_position(&self, tile: u16) -> (usize, usize) {
        let index = tile as usize - 1;
        (index / self.size, index % self.size)
    }

    /// Number of non-blank tiles that are not at their goal position.
    pub fn mismatch_count(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(cell_index, &tile)| tile != BLANK && tile as usize != cell_index + 1)
            .count() as u32
    }

    /// Sum of the Manhattan distances of every non-blank tile to its goal position.
    pub fn total_displacement(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(cell_index, &tile)| {
                let (row, col) = (cell_index / self.size, cell_index % self.size);
                let (goal_row, goal_col) = self.goal_position(tile);
                (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
            })
            .sum()
    }

    /// Returns true when every non-blank tile is at its goal position.
    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(cell_index, &tile)| tile == BLANK || tile as usize == cell_index + 1)
    }

    /// Returns the grid reached by moving the blank one cell in `direction`,
    /// or `None` if the blank would leave the grid.
    pub fn slide(&self, direction: Direction) -> Option<Grid> {
        let (row, col) = self.blank_position();
        let (row_offset, col_offset) = direction.offset();
        let target_row = row.checked_add_signed(row_offset).filter(|&r| r < self.size)?;
        let target_col = col.checked_add_signed(col_offset).filter(|&c| c < self.size)?;
        let target = target_row * self.size + target_col;

        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(Grid {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// All grids one slide away, in `Direction::ALL` order.
    pub fn neighbors(&self) -> Vec<Grid> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.slide(direction))
            .collect()
    }

    /// Direction of the single slide that turns this grid into `next`, if any.
    pub fn direction_to(&self, next: &Grid) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.slide(direction).as_ref() == Some(next))
    }

    /// Decides whether the goal arrangement is reachable by legal slides.
    ///
    /// The blank is first walked to the bottom-right corner (right, then down).
    /// Each slide is a transposition with the blank, and walking it home undoes
    /// the row changes that would otherwise flip the parity, so the grid is
    /// solvable exactly when the remaining N*N-1 tiles form an even permutation.
    pub fn is_solvable(&self) -> bool {
        let size = self.size;
        let last = size - 1;
        let mut tiles = self.tiles.to_vec();
        let (mut row, mut col) = self.blank_position();

        while col < last {
            tiles.swap(row * size + col, row * size + col + 1);
            col += 1;
        }
        while row < last {
            tiles.swap(row * size + col, (row + 1) * size + col);
            row += 1;
        }

        is_even_permutation(&tiles[..tiles.len() - 1])
    }
}

/// Parity of a permutation of `1..=len`, where value `v` belongs at index `v - 1`.
///
/// Uses cycle decomposition: a permutation is even when its length minus its
/// cycle count is even, which matches the parity of its inversion count.
fn is_even_permutation(tiles: &[u16]) -> bool {
    let mut visited = vec![false; tiles.len()];
    let mut cycles = 0;

    for start in 0..tiles.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut index = start;
        while !visited[index] {
            visited[index] = true;
            index = tiles[index] as usize - 1;
        }
    }

    (tiles.len() - cycles) % 2 == 0
}

/// Renders rows of right-aligned tiles; the blank is left empty.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).max(1).to_string().len();

        for row in self.tiles.chunks(self.size) {
            for (col, &tile) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if tile == BLANK {
                    write!(f, "{:width$}", "")?;
                } else {
                    write!(f, "{tile:>width$}")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u16]]) -> Grid {
        Grid::new(rows).unwrap()
    }

    fn assignment_example() -> Grid {
        grid(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]])
    }

    fn four_by_four_example() -> Grid {
        grid(&[
            &[3, 1, 6, 4],
            &[5, 0, 9, 7],
            &[10, 2, 11, 8],
            &[13, 15, 14, 12],
        ])
    }

    /// Deterministic pseudo-random walk of the blank.
    fn scramble(start: &Grid, steps: usize, seed: u64) -> Grid {
        let mut state = seed;
        let mut current = start.clone();
        for _ in 0..steps {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let neighbors = current.neighbors();
            current = neighbors[(state >> 33) as usize % neighbors.len()].clone();
        }
        current
    }

    #[test]
    fn test_mismatch_count_assignment_example() {
        assert_eq!(assignment_example().mismatch_count(), 5);
    }

    #[test]
    fn test_mismatch_count_4x4_example() {
        assert_eq!(four_by_four_example().mismatch_count(), 11);
    }

    #[test]
    fn test_total_displacement_assignment_example() {
        assert_eq!(assignment_example().total_displacement(), 10);
    }

    #[test]
    fn test_total_displacement_4x4_example() {
        assert_eq!(four_by_four_example().total_displacement(), 16);
    }

    #[test]
    fn test_solvable_4x4_example() {
        assert!(four_by_four_example().is_solvable());
    }

    #[test]
    fn test_swapped_tiles_are_unsolvable() {
        assert!(!grid(&[&[1, 2, 3], &[4, 6, 5], &[7, 8, 0]]).is_solvable());
    }

    #[test]
    fn test_solved_grid() {
        let solved = grid(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert!(solved.is_solved());
        assert!(solved.is_solvable());
        assert_eq!(solved.mismatch_count(), 0);
        assert_eq!(solved.total_displacement(), 0);
        assert_eq!(solved, Grid::solved(3).unwrap());
    }

    #[test]
    fn test_unsolved_assignment_example() {
        assert!(!assignment_example().is_solved());
    }

    #[test]
    fn test_single_cell_grid_is_solved() {
        let single = grid(&[&[0]]);
        assert!(single.is_solved());
        assert!(single.is_solvable());
        assert!(single.neighbors().is_empty());
    }

    #[test]
    fn test_rejects_empty_matrix() {
        let rows: &[&[u16]] = &[];
        assert!(matches!(Grid::new(rows), Err(Error::InvalidShape(_))));
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let result = Grid::new(&[vec![1u16, 2, 3], vec![4, 5, 6]]);
        assert!(matches!(result, Err(Error::InvalidShape(_))), "2x3 matrix should be rejected");

        let ragged = Grid::new(&[vec![1u16, 2], vec![3]]);
        assert!(matches!(ragged, Err(Error::InvalidShape(_))), "ragged matrix should be rejected");
    }

    #[test]
    fn test_rejects_duplicate_and_out_of_range_tiles() {
        let duplicate = Grid::new(&[[1u16, 1], [2, 0]]);
        assert!(matches!(duplicate, Err(Error::InvalidShape(_))));

        let out_of_range = Grid::new(&[[1u16, 2], [4, 0]]);
        assert!(matches!(out_of_range, Err(Error::InvalidShape(_))));

        let no_blank = Grid::from_flat(2, vec![1, 2, 3, 3]);
        assert!(matches!(no_blank, Err(Error::InvalidShape(_))));
    }

    #[test]
    fn test_rejects_too_many_rows_before_allocating() {
        let tall = vec![Vec::<u16>::new(); 300];
        assert!(matches!(Grid::new(&tall[..]), Err(Error::InvalidShape(_))));

        let huge = vec![Vec::<u16>::new(); 1 << 16];
        assert!(
            matches!(Grid::new(&huge[..]), Err(Error::InvalidShape(_))),
            "row count alone must be rejected"
        );
    }

    #[test]
    fn test_get_reads_row_major_cells() {
        let board = assignment_example();
        assert_eq!(board.get(0, 0), 8);
        assert_eq!(board.get(1, 2), 2);
        assert_eq!(board.get(2, 1), 6);
        assert_eq!(board.get(1, 1), BLANK);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn test_get_panics_outside_grid() {
        assignment_example().get(3, 0);
    }

    #[test]
    fn test_construction_copies_the_matrix() {
        let mut rows = vec![vec![1u16, 2], vec![3, 0]];
        let built = Grid::new(&rows[..]).unwrap();
        rows[0][0] = 2;
        rows[0][1] = 1;
        assert_eq!(built.tiles(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_slide_leaves_original_untouched() {
        let original = Grid::solved(3).unwrap();
        let moved = original.slide(Direction::Left).unwrap();
        assert_eq!(original, Grid::solved(3).unwrap());
        assert_eq!(moved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(moved.blank_position(), (2, 1));
        assert!(original.slide(Direction::Right).is_none(), "blank is already in the last column");
        assert!(original.slide(Direction::Down).is_none(), "blank is already in the last row");
    }

    #[test]
    fn test_neighbors_follow_fixed_direction_order() {
        let center = assignment_example();
        let expected: Vec<Grid> = vec![
            grid(&[&[8, 1, 3], &[0, 4, 2], &[7, 6, 5]]),
            grid(&[&[8, 0, 3], &[4, 1, 2], &[7, 6, 5]]),
            grid(&[&[8, 1, 3], &[4, 2, 0], &[7, 6, 5]]),
            grid(&[&[8, 1, 3], &[4, 6, 2], &[7, 0, 5]]),
        ];
        assert_eq!(center.neighbors(), expected);
    }

    #[test]
    fn test_neighbor_counts_by_blank_position() {
        let corner = Grid::solved(3).unwrap();
        let edge = corner.slide(Direction::Left).unwrap();
        let center = edge.slide(Direction::Up).unwrap();
        assert_eq!(corner.neighbors().len(), 2);
        assert_eq!(edge.neighbors().len(), 3);
        assert_eq!(center.neighbors().len(), 4);
    }

    #[test]
    fn test_neighbors_never_contain_self() {
        for seed in 0..20 {
            let board = scramble(&Grid::solved(4).unwrap(), 30, seed);
            let neighbors = board.neighbors();
            assert!(
                (2..=4).contains(&neighbors.len()),
                "seed {seed}: {} neighbors",
                neighbors.len()
            );
            assert!(!neighbors.contains(&board), "seed {seed}: grid is its own neighbor");
        }
    }

    #[test]
    fn test_heuristics_are_zero_only_when_solved() {
        for seed in 0..50 {
            let board = scramble(&Grid::solved(3).unwrap(), 15, seed);
            assert_eq!(board.mismatch_count() == 0, board.is_solved(), "seed {seed}");
            assert_eq!(board.total_displacement() == 0, board.is_solved(), "seed {seed}");
            assert!(
                board.mismatch_count() <= board.total_displacement(),
                "seed {seed}: displacement should dominate mismatch count"
            );
        }
    }

    #[test]
    fn test_solvability_is_invariant_under_slides() {
        let unsolvable = grid(&[&[2, 1, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12], &[13, 14, 15, 0]]);
        for seed in 0..25 {
            let reachable = scramble(&Grid::solved(4).unwrap(), 40, seed);
            assert!(reachable.is_solvable(), "seed {seed}: scrambled goal must stay solvable");

            let still_unsolvable = scramble(&unsolvable, 40, seed);
            assert!(
                !still_unsolvable.is_solvable(),
                "seed {seed}: slides must not make an odd grid solvable"
            );
        }
    }

    #[test]
    fn test_direction_to_recovers_the_slide() {
        let start = assignment_example();
        for direction in Direction::ALL {
            let next = start.slide(direction).unwrap();
            assert_eq!(start.direction_to(&next), Some(direction));
            assert_eq!(next.direction_to(&start), Some(direction.opposite()));
        }
        assert_eq!(start.direction_to(&start), None);
    }

    #[test]
    fn test_equal_grids_hash_equally() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |board: &Grid| {
            let mut hasher = DefaultHasher::new();
            board.hash(&mut hasher);
            hasher.finish()
        };

        let a = assignment_example();
        let b = Grid::from_flat(3, vec![8, 1, 3, 4, 0, 2, 7, 6, 5]).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_display_leaves_blank_empty() {
        let rendered = grid(&[&[1, 2], &[0, 3]]).to_string();
        assert_eq!(rendered, "1 2\n  3\n");

        let wide = four_by_four_example().to_string();
        assert_eq!(wide.lines().nth(1), Some(" 5    9  7"));
    }
}
