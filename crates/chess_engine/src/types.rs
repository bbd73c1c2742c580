//! Core value types shared by the search and the rules adapter

/// Search score, always from the perspective of the side to move at the
/// node being scored (negamax convention).
pub type Score = f32;

/// Game result as seen by the side to move
///
/// Standard chess has no terminal position won by the side to move, so a
/// decisive result is always `OpponentWins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// The side to move has been checkmated
    OpponentWins,
    Draw,
    InProgress,
}
