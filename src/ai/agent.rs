use crate::game::Board;

/// Common interface for all move-selecting agents.
///
/// Selection takes `&mut self` so an agent can advance its RNG and update
/// its telemetry counters; at most one selection is in flight per instance.
/// Agents never mutate the board they are given.
pub trait Agent {
    /// Pick a column for the side to move, or `None` if the board has no
    /// legal moves. A returned column is always legal on `board`.
    fn select_move(&mut self, board: &Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
