use std::fmt;

use super::player::Player;

/// Standard board height.
pub const DEFAULT_ROWS: usize = 6;
/// Standard board width.
pub const DEFAULT_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

/// A gravity-drop board of configurable size.
///
/// Row 0 is the top; discs land in the lowest empty row of a column. The
/// board tracks whose turn it is and flips the turn after every successful
/// move. It never refuses moves on a decided game: callers gate on
/// [`Board::is_terminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    current_player: Player,
    last_move: Option<(usize, usize)>,
}

/// Hashable snapshot of the cell grid plus the side to move, used as a
/// transposition-cache key during search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    cells: Vec<Cell>,
    to_move: Player,
}

impl Board {
    /// Create an empty board with the given dimensions.
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            current_player: Player::One,
            last_move: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The player to move next.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// `(row, col)` of the most recent placement, if any.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `rows - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Drop the current player's disc in a column, returning the row where
    /// it landed. On error the board is left untouched.
    pub fn apply_move(&mut self, col: usize) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;

        self.cells[row * self.cols + col] = self.current_player.to_cell();
        self.last_move = Some((row, col));
        self.current_player = self.current_player.other();
        Ok(row)
    }

    /// The lowest empty row in `col`, or `None` if the column is full.
    fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.rows).rev().find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Columns that can still accept a disc, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// The game is over: someone has four in a row, or the board is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Scan the whole board for four in a row and return the owner.
    ///
    /// Windows are visited horizontally, vertically, then along both
    /// diagonals. Boards smaller than four in a dimension simply have no
    /// windows in that direction.
    pub fn winner(&self) -> Option<Player> {
        self.scan_horizontal()
            .or_else(|| self.scan_vertical())
            .or_else(|| self.scan_diagonal_down())
            .or_else(|| self.scan_diagonal_up())
    }

    /// Horizontal runs (left to right).
    fn scan_horizontal(&self) -> Option<Player> {
        for row in 0..self.rows {
            for col in 0..self.cols.saturating_sub(3) {
                let cell = self.get(row, col);
                if cell != Cell::Empty
                    && self.get(row, col + 1) == cell
                    && self.get(row, col + 2) == cell
                    && self.get(row, col + 3) == cell
                {
                    return cell.player();
                }
            }
        }
        None
    }

    /// Vertical runs (top to bottom).
    fn scan_vertical(&self) -> Option<Player> {
        for col in 0..self.cols {
            for row in 0..self.rows.saturating_sub(3) {
                let cell = self.get(row, col);
                if cell != Cell::Empty
                    && self.get(row + 1, col) == cell
                    && self.get(row + 2, col) == cell
                    && self.get(row + 3, col) == cell
                {
                    return cell.player();
                }
            }
        }
        None
    }

    /// Diagonal runs going down-right (\).
    fn scan_diagonal_down(&self) -> Option<Player> {
        for row in 0..self.rows.saturating_sub(3) {
            for col in 0..self.cols.saturating_sub(3) {
                let cell = self.get(row, col);
                if cell != Cell::Empty
                    && self.get(row + 1, col + 1) == cell
                    && self.get(row + 2, col + 2) == cell
                    && self.get(row + 3, col + 3) == cell
                {
                    return cell.player();
                }
            }
        }
        None
    }

    /// Diagonal runs going up-right (/).
    fn scan_diagonal_up(&self) -> Option<Player> {
        for row in 3..self.rows {
            for col in 0..self.cols.saturating_sub(3) {
                let cell = self.get(row, col);
                if cell != Cell::Empty
                    && self.get(row - 1, col + 1) == cell
                    && self.get(row - 2, col + 2) == cell
                    && self.get(row - 3, col + 3) == cell
                {
                    return cell.player();
                }
            }
        }
        None
    }

    /// Would dropping a disc for `player` into `col` complete four in a row
    /// for them, regardless of whose turn it is? False for unplayable
    /// columns. Non-mutating.
    pub fn would_win(&self, col: usize, player: Player) -> bool {
        if col >= self.cols {
            return false;
        }
        match self.landing_row(col) {
            Some(row) => {
                let cell = player.to_cell();
                self.run_through(row, col, cell, 0, 1) >= 4
                    || self.run_through(row, col, cell, 1, 0) >= 4
                    || self.run_through(row, col, cell, 1, 1) >= 4
                    || self.run_through(row, col, cell, 1, -1) >= 4
            }
            None => false,
        }
    }

    /// Length of the run of `cell` discs through `(row, col)` along the
    /// `(dr, dc)` axis, counting the cell itself as occupied.
    fn run_through(&self, row: usize, col: usize, cell: Cell, dr: isize, dc: isize) -> usize {
        let mut count = 1;
        for sign in [1isize, -1] {
            let mut r = row as isize + dr * sign;
            let mut c = col as isize + dc * sign;
            while r >= 0
                && r < self.rows as isize
                && c >= 0
                && c < self.cols as isize
                && self.get(r as usize, c as usize) == cell
            {
                count += 1;
                r += dr * sign;
                c += dc * sign;
            }
        }
        count
    }

    /// Snapshot of the position for transposition-cache lookups.
    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            cells: self.cells.clone(),
            to_move: self.current_player,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, "|")?;
                }
                let symbol = match self.get(row, col) {
                    Cell::Empty => ' ',
                    Cell::One => 'X',
                    Cell::Two => 'O',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(2 * self.cols - 1))?;
        for col in 0..self.cols {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{col}")?;
        }
        Ok(())
    }
}
