use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::game::{Board, Player};

use super::agent::Agent;

/// Simulation budgets for the named difficulty levels.
const EASY_SIMULATIONS: usize = 500;
const MEDIUM_SIMULATIONS: usize = 1000;
const HARD_SIMULATIONS: usize = 2000;

/// UCB1 exploration constant.
const EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Map a difficulty label to a simulation budget. Unrecognized labels run
/// with the medium budget; the label itself is kept for reporting.
fn simulations_for(difficulty: &str) -> usize {
    match difficulty {
        "easy" => EASY_SIMULATIONS,
        "hard" => HARD_SIMULATIONS,
        _ => MEDIUM_SIMULATIONS,
    }
}

/// Performance counters from the most recent `select_move` call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MctsStats {
    pub difficulty: String,
    /// Configured simulation budget, not a measurement.
    pub simulations: usize,
    pub nodes_explored: u64,
    /// Wall-clock time of the last search, in seconds.
    pub simulation_time: f64,
    pub simulations_per_second: f64,
}

/// One arena slot in the search tree. Children are stored as
/// `(column, index)` pairs in the order they were expanded.
struct Node {
    board: Board,
    parent: Option<usize>,
    children: Vec<(usize, usize)>,
    untried: Vec<usize>,
    visits: u64,
    wins: f64,
}

impl Node {
    fn new(board: Board, parent: Option<usize>) -> Self {
        let untried = board.legal_moves();
        Node {
            board,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            wins: 0.0,
        }
    }
}

/// Monte Carlo tree search with UCB1 selection and guided playouts.
///
/// Rewards are always from the perspective of the player to move at the
/// root: 1.0 win, 0.5 draw, 0.0 loss. Backpropagation adds the same reward
/// to every node on the path, with no sign alternation.
pub struct MctsAgent {
    difficulty: String,
    simulations: usize,
    exploration: f64,
    nodes_explored: u64,
    simulation_time: Duration,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(difficulty: &str) -> Self {
        Self::build(difficulty, StdRng::from_os_rng())
    }

    /// Deterministic variant for reproducible searches.
    pub fn with_seed(difficulty: &str, seed: u64) -> Self {
        Self::build(difficulty, StdRng::seed_from_u64(seed))
    }

    fn build(difficulty: &str, rng: StdRng) -> Self {
        MctsAgent {
            difficulty: difficulty.to_string(),
            simulations: simulations_for(difficulty),
            exploration: EXPLORATION,
            nodes_explored: 0,
            simulation_time: Duration::ZERO,
            rng,
        }
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Counters from the most recent search. Zeroed until the first call.
    pub fn performance_stats(&self) -> MctsStats {
        let secs = self.simulation_time.as_secs_f64();
        let simulations_per_second = if secs > 0.0 {
            self.simulations as f64 / secs
        } else {
            0.0
        };
        MctsStats {
            difficulty: self.difficulty.clone(),
            simulations: self.simulations,
            nodes_explored: self.nodes_explored,
            simulation_time: secs,
            simulations_per_second,
        }
    }

    fn best_move(&mut self, board: &Board) -> Option<usize> {
        self.nodes_explored = 0;
        let start = Instant::now();

        let legal = board.legal_moves();
        if legal.is_empty() {
            self.simulation_time = start.elapsed();
            return None;
        }
        if legal.len() == 1 {
            self.simulation_time = start.elapsed();
            return Some(legal[0]);
        }

        let root_player = board.current_player();
        let mut nodes: Vec<Node> = vec![Node::new(board.clone(), None)];

        for _ in 0..self.simulations {
            // Selection: descend while fully expanded and undecided
            let mut idx = 0;
            self.nodes_explored += 1;
            while !nodes[idx].board.is_terminal() && nodes[idx].untried.is_empty() {
                match self.select_child(&nodes, idx) {
                    Some(child) => {
                        idx = child;
                        self.nodes_explored += 1;
                    }
                    None => break,
                }
            }

            // Expansion: materialize one untried column at random
            if !nodes[idx].board.is_terminal() && !nodes[idx].untried.is_empty() {
                let pick = self.rng.random_range(0..nodes[idx].untried.len());
                let col = nodes[idx].untried.swap_remove(pick);
                let mut child_board = nodes[idx].board.clone();
                child_board.apply_move(col).unwrap();
                let child = nodes.len();
                nodes.push(Node::new(child_board, Some(idx)));
                nodes[idx].children.push((col, child));
                idx = child;
                self.nodes_explored += 1;
            }

            // Playout and backpropagation
            let result = self.playout(&nodes[idx].board, root_player);
            let mut cur = Some(idx);
            while let Some(i) = cur {
                nodes[i].visits += 1;
                nodes[i].wins += result;
                cur = nodes[i].parent;
            }
        }

        self.simulation_time = start.elapsed();

        // Pick the root child with the highest win rate. A tied rate keeps
        // the first child encountered; expansion already randomized the
        // child order.
        let root = &nodes[0];
        let mut best: Option<(usize, f64)> = None;
        for &(col, child) in &root.children {
            let node = &nodes[child];
            if node.visits == 0 {
                continue;
            }
            let rate = node.wins / node.visits as f64;
            trace!(col, rate, visits = node.visits, "root child");
            if best.map_or(true, |(_, b)| rate > b) {
                best = Some((col, rate));
            }
        }

        let choice = match best {
            Some((col, _)) => col,
            None => legal[self.rng.random_range(0..legal.len())],
        };

        debug!(
            difficulty = %self.difficulty,
            simulations = self.simulations,
            nodes = self.nodes_explored,
            elapsed_ms = self.simulation_time.as_millis() as u64,
            col = choice,
            "mcts move selected"
        );

        Some(choice)
    }

    /// UCB1 over the visited children of `idx`; unvisited children are
    /// skipped. `None` if no child is eligible.
    fn select_child(&self, nodes: &[Node], idx: usize) -> Option<usize> {
        let parent_visits = nodes[idx].visits;
        let mut best: Option<(usize, f64)> = None;

        for &(_, child) in &nodes[idx].children {
            let node = &nodes[child];
            if node.visits == 0 {
                continue;
            }
            let exploit = node.wins / node.visits as f64;
            let explore =
                self.exploration * ((parent_visits as f64).ln() / node.visits as f64).sqrt();
            let score = exploit + explore;
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((child, score));
            }
        }

        best.map(|(child, _)| child)
    }

    /// Play `board` to completion with the guided policy and score the
    /// outcome for `root_player`: 1.0 win, 0.5 draw, 0.0 loss.
    fn playout(&mut self, board: &Board, root_player: Player) -> f64 {
        let mut board = board.clone();
        while !board.is_terminal() {
            let col = self.playout_move(&board);
            board.apply_move(col).unwrap();
        }
        match board.winner() {
            Some(winner) if winner == root_player => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }

    /// Playout policy: win immediately when possible, block an opponent's
    /// immediate win otherwise, else play as close to the center as
    /// possible.
    fn playout_move(&mut self, board: &Board) -> usize {
        let legal = board.legal_moves();
        let mover = board.current_player();

        for &col in &legal {
            if board.would_win(col, mover) {
                return col;
            }
        }
        let opponent = mover.other();
        for &col in &legal {
            if board.would_win(col, opponent) {
                return col;
            }
        }

        let center = board.cols() / 2;
        let mut closest = usize::MAX;
        let mut candidates: Vec<usize> = Vec::new();
        for &col in &legal {
            let dist = col.abs_diff(center);
            if dist < closest {
                closest = dist;
                candidates.clear();
                candidates.push(col);
            } else if dist == closest {
                candidates.push(col);
            }
        }
        candidates[self.rng.random_range(0..candidates.len())]
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "MCTS"
    }
}
