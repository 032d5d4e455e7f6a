//! Monte Carlo Tree Search over board snapshots.
//!
//! Each iteration selects a node by UCB1, expands one unexplored move, plays a
//! bounded random rollout from the new node and backs the result up to the
//! root. The recommended move is the root child with the best observed win
//! rate. With `trees > 1`, independent trees run on rayon workers and their
//! root statistics are merged.

use std::time::{Duration, Instant};

use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::board::Board;
use crate::rng::rng_for_search;
use crate::state::Move;

pub mod rollout;
pub mod tree;

pub use rollout::{rollout, RolloutPolicy};
pub use tree::{ucb1, ChildStats, Tree};

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Iterations per tree.
    pub simulations: u32,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Maximum moves per rollout.
    pub rollout_depth: u32,
    pub rollout_policy: RolloutPolicy,
    /// Independent trees searched in parallel (1 = single-threaded).
    pub trees: usize,
    /// Optional wall-clock cap; iterations stop once it passes, after the first.
    pub time_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            exploration: 1.4,
            rollout_depth: 20,
            rollout_policy: RolloutPolicy::HomeFirst,
            trees: 1,
            time_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub best: Option<Move>,
    /// Root children merged across trees, in first-expanded order.
    pub children: Vec<ChildStats>,
    /// Iterations actually run, summed over trees.
    pub iterations: u32,
}

fn run_tree<R: Rng + ?Sized>(
    board: &Board,
    config: &SearchConfig,
    deadline: Option<Instant>,
    rng: &mut R,
) -> (Vec<ChildStats>, u32) {
    let mut tree = Tree::new(board.clone());
    let mut iterations = 0u32;

    for _ in 0..config.simulations {
        // At least one iteration always runs so a position with moves gets a child.
        if iterations > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        let mut node = tree.select(config.exploration);
        if let Some(child) = tree.expand(node) {
            node = child;
        }
        let win = rollout(tree.board(node), config.rollout_depth, config.rollout_policy, rng);
        tree.backpropagate(node, win);
        iterations += 1;
    }

    (tree.root_children().collect(), iterations)
}

fn merge_into(acc: &mut Vec<ChildStats>, children: Vec<ChildStats>) {
    for child in children {
        match acc.iter_mut().find(|s| s.mv == child.mv) {
            Some(s) => {
                s.wins = s.wins.saturating_add(child.wins);
                s.visits = s.visits.saturating_add(child.visits);
            }
            None => acc.push(child),
        }
    }
}

/// First child with the highest win rate among those visited at least once.
pub fn best_child(children: &[ChildStats]) -> Option<Move> {
    let mut best: Option<&ChildStats> = None;
    for child in children.iter().filter(|s| s.visits > 0) {
        if best.map_or(true, |b| child.win_rate() > b.win_rate()) {
            best = Some(child);
        }
    }
    best.map(|s| s.mv)
}

/// Run the search from `board`. Per-tree RNGs are seeded from `rng` before
/// fanning out, so the report is reproducible for a seeded caller RNG.
pub fn search<R: Rng + ?Sized>(board: &Board, config: &SearchConfig, rng: &mut R) -> SearchReport {
    let deadline = config.time_ms.map(|ms| Instant::now() + Duration::from_millis(ms));
    let trees = config.trees.max(1);
    let seeds: Vec<u64> = (0..trees).map(|_| rng.gen()).collect();

    let runs: Vec<(Vec<ChildStats>, u32)> = if trees == 1 {
        let mut tree_rng = rng_for_search(seeds[0], 0);
        vec![run_tree(board, config, deadline, &mut tree_rng)]
    } else {
        seeds
            .par_iter()
            .enumerate()
            .map(|(i, &seed)| {
                let mut tree_rng = rng_for_search(seed, i as u64);
                run_tree(board, config, deadline, &mut tree_rng)
            })
            .collect()
    };

    let (children, iterations) = merge_runs(runs);
    SearchReport { best: best_child(&children), children, iterations }
}

/// Fold per-tree results together; counts saturate instead of wrapping.
fn merge_runs(runs: Vec<(Vec<ChildStats>, u32)>) -> (Vec<ChildStats>, u32) {
    let mut children = Vec::new();
    let mut iterations = 0u32;
    for (stats, n) in runs {
        merge_into(&mut children, stats);
        iterations = iterations.saturating_add(n);
    }
    (children, iterations)
}

/// Recommend a move for `board`, or None when no move is legal.
#[inline]
pub fn computer_play<R: Rng + ?Sized>(board: &Board, config: &SearchConfig, rng: &mut R) -> Option<Move> {
    search(board, config, rng).best
}
