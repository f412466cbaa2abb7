use crate::game::{Board, Player};

/// Score of a decided position, regardless of margin.
pub const WIN_SCORE: i32 = 1000;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Default heuristic.
///
/// Decided positions are worth `±WIN_SCORE`. Otherwise the score
/// accumulates a center-column bonus, threat scores over every 4-cell
/// window, and a penalty for discs with no friendly neighbor. A full board
/// with no winner is not special-cased; it falls through to the positional
/// terms like any other position.
pub struct PositionalHeuristic;

impl PositionalHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 4 {
            100
        } else if own == 3 && empty == 1 {
            5
        } else if own == 2 && empty == 2 {
            2
        } else if opp == 3 && empty == 1 {
            -4
        } else {
            0
        }
    }

    /// Count `player` discs with no friendly disc in any of the eight
    /// neighboring cells (clamped at the edges).
    fn isolated_discs(board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let rows = board.rows() as isize;
        let cols = board.cols() as isize;
        let mut count = 0;

        for row in 0..rows {
            for col in 0..cols {
                if board.get(row as usize, col as usize) != own_cell {
                    continue;
                }
                let mut has_neighbor = false;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let (r, c) = (row + dr, col + dc);
                        if r >= 0
                            && r < rows
                            && c >= 0
                            && c < cols
                            && board.get(r as usize, c as usize) == own_cell
                        {
                            has_neighbor = true;
                        }
                    }
                }
                if !has_neighbor {
                    count += 1;
                }
            }
        }

        count
    }
}

impl Heuristic for PositionalHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        if let Some(winner) = board.winner() {
            return if winner == player { WIN_SCORE } else { -WIN_SCORE };
        }

        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let rows = board.rows();
        let cols = board.cols();
        let mut score = 0;

        // Center column bonus
        let center = cols / 2;
        for row in 0..rows {
            if board.get(row, center) == own_cell {
                score += 3;
            }
        }

        // Scan all 4-cell windows

        // Horizontal
        for row in 0..rows {
            for col in 0..cols.saturating_sub(3) {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Vertical
        for col in 0..cols {
            for row in 0..rows.saturating_sub(3) {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row + i, col) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in 0..rows.saturating_sub(3) {
            for col in 0..cols.saturating_sub(3) {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row + i, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Diagonal (bottom-left to top-right)
        for row in 3..rows {
            for col in 0..cols.saturating_sub(3) {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row - i, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        score - Self::isolated_discs(board, player)
    }
}
