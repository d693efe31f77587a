//! Best-first (A*) search over sliding tile grids.
//!
//! Key points:
//! - Solvability is decided up front, so an unsolvable grid never starts a search
//! - Search nodes live in an arena and point at their predecessor by index,
//!   so sibling paths share their history instead of copying it
//! - The only duplicate suppression is skipping the grid the popped node came
//!   from; other repeated grids are re-enqueued and the priority order absorbs them
//! - Frontier ties go to the deeper node, then to the older entry, which keeps
//!   every run deterministic

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::evaluation::Evaluation;
use crate::grid::{Direction, Grid};

/// Expansions between progress log lines.
const PROGRESS_INTERVAL: usize = 100_000;

/// Arena index of a search node.
type NodeIndex = usize;

/// A grid together with how it was reached.
struct SearchNode {
    grid: Grid,
    /// Moves taken from the initial grid.
    path_cost: u32,
    /// `None` for the root.
    predecessor: Option<NodeIndex>,
}

/// Frontier entry referring to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    score: u32,
    path_cost: u32,
    node: NodeIndex,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the lowest score compares greatest
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.path_cost.cmp(&other.path_cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters collected during a search. They never influence the search itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded, the goal node included.
    pub expanded: usize,
    /// Nodes created, the root included.
    pub generated: usize,
    /// Largest number of entries the frontier held at once.
    pub peak_frontier: usize,
    /// Distinct grids among the expanded nodes.
    pub distinct_expanded: usize,
}

impl SearchStats {
    /// Expansions of a grid that had already been expanded through another path.
    pub fn re_expanded(&self) -> usize {
        self.expanded - self.distinct_expanded
    }
}

/// An optimal sequence of grids from the initial arrangement to the goal.
#[derive(Debug, Clone)]
pub struct Solution {
    grids: Vec<Grid>,
    stats: SearchStats,
}

impl Solution {
    /// Grids from the initial arrangement (first) to the goal (last).
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Number of grids, both ends included. Always at least 1.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always false: a solution contains at least the initial grid.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Minimum number of slides needed to solve the initial grid.
    pub fn move_count(&self) -> usize {
        self.grids.len() - 1
    }

    pub fn initial(&self) -> &Grid {
        &self.grids[0]
    }

    pub fn goal(&self) -> &Grid {
        &self.grids[self.grids.len() - 1]
    }

    /// Direction the blank travels on each move.
    pub fn directions(&self) -> Vec<Direction> {
        self.grids
            .windows(2)
            .filter_map(|pair| pair[0].direction_to(&pair[1]))
            .collect()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_grids(self) -> Vec<Grid> {
        self.grids
    }
}

/// Finds a minimum-length sequence of slides that solves `initial`.
///
/// Fails with `Error::Unsolvable` before any exploration when the goal
/// arrangement cannot be reached.
pub fn solve(initial: &Grid, evaluation: Evaluation) -> Result<Solution> {
    if !initial.is_solvable() {
        return Err(Error::Unsolvable);
    }

    debug!(
        "Solving {size}x{size} grid with {evaluation} evaluation (initial estimate {estimate})",
        size = initial.size(),
        estimate = evaluation.heuristic(initial)
    );

    let mut arena: Vec<SearchNode> = vec![SearchNode {
        grid: initial.clone(),
        path_cost: 0,
        predecessor: None,
    }];
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        score: evaluation.score(initial, 0),
        path_cost: 0,
        node: 0,
    });

    let mut stats = SearchStats {
        generated: 1,
        peak_frontier: 1,
        ..SearchStats::default()
    };
    let mut expanded_grids: FxHashSet<Grid> = FxHashSet::default();

    // the frontier cannot run dry for a solvable grid: every node has a neighbor
    // other than its parent, except on a 1x1 grid, which is already solved
    while let Some(entry) = frontier.pop() {
        stats.expanded += 1;
        let current = &arena[entry.node];
        if expanded_grids.insert(current.grid.clone()) {
            stats.distinct_expanded += 1;
        }

        if current.grid.is_solved() {
            let grids = reconstruct_path(&arena, entry.node);
            debug!(
                "Solved in {} moves: expanded {} nodes ({} re-expanded), generated {}, peak frontier {}",
                grids.len() - 1,
                stats.expanded,
                stats.re_expanded(),
                stats.generated,
                stats.peak_frontier
            );
            return Ok(Solution { grids, stats });
        }

        if stats.expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                "Expanded {} nodes, frontier holds {}, current score {}",
                stats.expanded,
                frontier.len(),
                entry.score
            );
        }

        let parent_grid = current.predecessor.map(|index| &arena[index].grid);
        let path_cost = current.path_cost + 1;
        let successors: Vec<Grid> = current
            .grid
            .neighbors()
            .into_iter()
            .filter(|neighbor| parent_grid != Some(neighbor))
            .collect();

        for grid in successors {
            let node = arena.len();
            frontier.push(FrontierEntry {
                score: evaluation.score(&grid, path_cost),
                path_cost,
                node,
            });
            arena.push(SearchNode {
                grid,
                path_cost,
                predecessor: Some(entry.node),
            });
            stats.generated += 1;
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    // only reachable if the solvability check disagreed with the slide rules
    Err(Error::Unsolvable)
}

/// Walks predecessor links from `goal` back to the root and returns the grids root first.
fn reconstruct_path(arena: &[SearchNode], goal: NodeIndex) -> Vec<Grid> {
    let mut grids = Vec::with_capacity(arena[goal].path_cost as usize + 1);
    let mut cursor = Some(goal);

    while let Some(index) = cursor {
        let node = &arena[index];
        grids.push(node.grid.clone());
        cursor = node.predecessor;
    }

    grids.reverse();
    grids
}
