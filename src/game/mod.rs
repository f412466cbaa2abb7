//! Core Connect Four game logic: the gravity-drop board, player types, and
//! the legality, win, and draw rules the search engines build on.

mod board;
mod player;

pub use board::{Board, Cell, MoveError, PositionKey, DEFAULT_COLS, DEFAULT_ROWS};
pub use player::Player;
