//! # Connect Four AI
//!
//! A Connect Four engine library with two move-selection strategies: a
//! minimax search with alpha-beta pruning and a Monte Carlo tree search
//! with guided playouts. Boards can be any rectangular size; both engines
//! expose difficulty levels and per-search performance counters.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, move application, win detection
//! - [`ai`] — Agent trait, minimax and MCTS engines, heuristic evaluation
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
