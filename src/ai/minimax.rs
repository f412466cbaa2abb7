use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::game::{Board, Player, PositionKey};

use super::agent::Agent;
use super::heuristic::{Heuristic, PositionalHeuristic};

/// Search depths (plies) for the named difficulty levels.
const EASY_DEPTH: usize = 2;
const MEDIUM_DEPTH: usize = 4;
const HARD_DEPTH: usize = 6;

/// Map a difficulty label to a search depth. Unrecognized labels run at the
/// medium depth; the label itself is kept for reporting.
fn depth_for(difficulty: &str) -> usize {
    match difficulty {
        "easy" => EASY_DEPTH,
        "hard" => HARD_DEPTH,
        _ => MEDIUM_DEPTH,
    }
}

/// Performance counters from the most recent `select_move` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MinimaxStats {
    pub difficulty: String,
    pub max_depth: usize,
    pub nodes_explored: u64,
    /// Wall-clock time of the last search, in seconds.
    pub evaluation_time: f64,
    pub pruning_count: u64,
    pub nodes_per_second: f64,
}

/// Depth-bounded minimax agent with alpha-beta pruning and a per-call
/// transposition cache.
///
/// Scores are always taken from the perspective of the player to move at
/// the top of the search. Equally good columns are broken uniformly at
/// random, so two engines at the same difficulty do not play identical
/// openings unless they share a seed.
pub struct MinimaxAgent {
    difficulty: String,
    max_depth: usize,
    heuristic: Box<dyn Heuristic>,
    cache: HashMap<PositionKey, i32>,
    nodes_explored: u64,
    pruning_count: u64,
    evaluation_time: Duration,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(difficulty: &str) -> Self {
        Self::build(difficulty, Box::new(PositionalHeuristic), StdRng::from_os_rng())
    }

    /// Deterministic variant for reproducible tie-breaking.
    pub fn with_seed(difficulty: &str, seed: u64) -> Self {
        Self::build(
            difficulty,
            Box::new(PositionalHeuristic),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn with_heuristic(difficulty: &str, heuristic: Box<dyn Heuristic>) -> Self {
        Self::build(difficulty, heuristic, StdRng::from_os_rng())
    }

    fn build(difficulty: &str, heuristic: Box<dyn Heuristic>, rng: StdRng) -> Self {
        MinimaxAgent {
            difficulty: difficulty.to_string(),
            max_depth: depth_for(difficulty),
            heuristic,
            cache: HashMap::new(),
            nodes_explored: 0,
            pruning_count: 0,
            evaluation_time: Duration::ZERO,
            rng,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Counters from the most recent search. Zeroed until the first call.
    pub fn performance_stats(&self) -> MinimaxStats {
        let secs = self.evaluation_time.as_secs_f64();
        let nodes_per_second = if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        };
        MinimaxStats {
            difficulty: self.difficulty.clone(),
            max_depth: self.max_depth,
            nodes_explored: self.nodes_explored,
            evaluation_time: secs,
            pruning_count: self.pruning_count,
            nodes_per_second,
        }
    }

    fn best_move(&mut self, board: &Board) -> Option<usize> {
        self.nodes_explored = 0;
        self.pruning_count = 0;
        self.cache.clear();
        let start = Instant::now();

        let legal = board.legal_moves();
        if legal.is_empty() {
            self.evaluation_time = start.elapsed();
            return None;
        }
        if legal.len() == 1 {
            self.evaluation_time = start.elapsed();
            return Some(legal[0]);
        }

        let player = board.current_player();
        let mut best_score = i32::MIN;
        let mut best_cols: Vec<usize> = Vec::new();

        // Each root move gets a fresh alpha-beta window so every candidate
        // receives an exact score; ties are collected, not discarded.
        for &col in &legal {
            let mut child = board.clone();
            child.apply_move(col).unwrap();
            let score =
                self.minimax(&child, self.max_depth - 1, i32::MIN, i32::MAX, false, player);
            trace!(col, score, "scored root move");
            if score > best_score {
                best_score = score;
                best_cols.clear();
                best_cols.push(col);
            } else if score == best_score {
                best_cols.push(col);
            }
        }

        let choice = best_cols[self.rng.random_range(0..best_cols.len())];
        self.evaluation_time = start.elapsed();

        debug!(
            difficulty = %self.difficulty,
            nodes = self.nodes_explored,
            pruned = self.pruning_count,
            elapsed_ms = self.evaluation_time.as_millis() as u64,
            col = choice,
            "minimax move selected"
        );

        Some(choice)
    }

    /// Minimax with alpha-beta pruning. `player` is the side the score is
    /// for; `maximizing` says whose turn the current node is.
    ///
    /// Cached values are keyed on position alone, so a hit may come from a
    /// different remaining depth within the same call. Hits still count as
    /// explored nodes.
    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> i32 {
        self.nodes_explored += 1;

        let key = board.position_key();
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        if depth == 0 || board.is_terminal() {
            let value = self.heuristic.evaluate(board, player);
            self.cache.insert(key, value);
            return value;
        }

        let legal = board.legal_moves();
        let value = if maximizing {
            let mut best = i32::MIN;
            for &col in &legal {
                let mut child = board.clone();
                child.apply_move(col).unwrap();
                let score = self.minimax(&child, depth - 1, alpha, beta, false, player);
                best = best.max(score);
                alpha = alpha.max(score);
                if alpha >= beta {
                    self.pruning_count += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for &col in &legal {
                let mut child = board.clone();
                child.apply_move(col).unwrap();
                let score = self.minimax(&child, depth - 1, alpha, beta, true, player);
                best = best.min(score);
                beta = beta.min(score);
                if alpha >= beta {
                    self.pruning_count += 1;
                    break;
                }
            }
            best
        };

        self.cache.insert(key, value);
        value
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
