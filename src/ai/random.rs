use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::Board;

use super::agent::Agent;

/// A baseline opponent: takes an immediate win when one exists, blocks an
/// opponent's immediate win otherwise, and plays uniformly at random the
/// rest of the time.
pub struct SmartRandomAgent {
    rng: StdRng,
}

impl SmartRandomAgent {
    pub fn new() -> Self {
        SmartRandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        SmartRandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SmartRandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for SmartRandomAgent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return None;
        }

        let mover = board.current_player();
        for &col in &legal {
            if board.would_win(col, mover) {
                return Some(col);
            }
        }
        let opponent = mover.other();
        for &col in &legal {
            if board.would_win(col, opponent) {
                return Some(col);
            }
        }

        Some(legal[self.rng.random_range(0..legal.len())])
    }

    fn name(&self) -> &str {
        "SmartRandom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_legal_move() {
        let mut agent = SmartRandomAgent::new();
        let board = Board::default();
        let legal = board.legal_moves();

        for _ in 0..100 {
            let action = agent.select_move(&board).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        // One has a vertical three in column 5
        let mut board = Board::default();
        board.apply_move(5).unwrap(); // One
        board.apply_move(0).unwrap(); // Two
        board.apply_move(5).unwrap(); // One
        board.apply_move(1).unwrap(); // Two
        board.apply_move(5).unwrap(); // One
        board.apply_move(0).unwrap(); // Two

        let mut agent = SmartRandomAgent::new();
        for _ in 0..20 {
            assert_eq!(agent.select_move(&board), Some(5));
        }
    }

    #[test]
    fn test_blocks_immediate_threat() {
        // One has a vertical three in column 2 and Two is to move with no
        // win of its own
        let mut board = Board::default();
        board.apply_move(2).unwrap(); // One
        board.apply_move(0).unwrap(); // Two
        board.apply_move(2).unwrap(); // One
        board.apply_move(6).unwrap(); // Two
        board.apply_move(2).unwrap(); // One

        let mut agent = SmartRandomAgent::new();
        for _ in 0..20 {
            assert_eq!(agent.select_move(&board), Some(2));
        }
    }

    #[test]
    fn test_exhausted_board_yields_no_move() {
        let mut board = Board::default();
        for (a, b) in [(0, 1), (2, 3), (4, 5)] {
            for col in [a, b, a, b, a, b, b, a, b, a, b, a] {
                board.apply_move(col).unwrap();
            }
        }
        for _ in 0..6 {
            board.apply_move(6).unwrap();
        }
        assert!(board.is_terminal());

        let mut agent = SmartRandomAgent::new();
        assert_eq!(agent.select_move(&board), None);
    }

    #[test]
    fn test_plays_full_game() {
        let mut agent1 = SmartRandomAgent::with_seed(11);
        let mut agent2 = SmartRandomAgent::with_seed(12);
        let mut board = Board::default();

        let mut turn = 0;
        while !board.is_terminal() {
            let action = if turn % 2 == 0 {
                agent1.select_move(&board).unwrap()
            } else {
                agent2.select_move(&board).unwrap()
            };
            board.apply_move(action).unwrap();
            turn += 1;
        }

        assert!(board.is_terminal());
        assert!(turn <= 42);
    }

    #[test]
    fn test_agent_name() {
        let agent = SmartRandomAgent::new();
        assert_eq!(agent.name(), "SmartRandom");
    }
}
