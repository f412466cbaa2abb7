//! Move-selection engines and the trait they share.

mod agent;
mod heuristic;
mod mcts;
mod minimax;
mod random;

pub use agent::Agent;
pub use heuristic::{Heuristic, PositionalHeuristic, WIN_SCORE};
pub use mcts::{MctsAgent, MctsStats};
pub use minimax::{MinimaxAgent, MinimaxStats};
pub use random::SmartRandomAgent;
