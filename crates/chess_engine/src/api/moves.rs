//! Move decoding and the play-move flow

use std::time::Duration;

use shakmaty::Move;

use super::game::Engine;
use super::state::{game_status, PlayOutcome};
use crate::board::{move_to_uci, Game};
use crate::error::ChessEngineResult;
use crate::evaluation::ValueModel;

/// Decode UCI move text against `game`
///
/// # Errors
///
/// - [`crate::ChessEngineError::InvalidMoveEncoding`] for malformed text
/// - [`crate::ChessEngineError::IllegalMove`] when the move is not legal in `game`
pub fn parse_move(game: &Game, text: &str) -> ChessEngineResult<Move> {
    game.parse_uci(text)
}

/// `true` if `text` decodes to a legal move in `game`
pub fn is_legal_move(game: &Game, text: &str) -> bool {
    game.parse_uci(text).is_ok()
}

impl<M: ValueModel> Engine<M> {
    /// Apply a human move, then let the engine reply
    ///
    /// If the human move ends the game there is no reply.
    ///
    /// # Errors
    ///
    /// - [`crate::ChessEngineError::InvalidPosition`] if `fen` does not parse
    /// - [`crate::ChessEngineError::InvalidMoveEncoding`] / [`crate::ChessEngineError::IllegalMove`]
    ///   if the human move is rejected
    /// - [`crate::ChessEngineError::EvaluatorUnavailable`] if the search fails
    pub fn play_move(
        &self,
        fen: &str,
        move_text: &str,
        time_budget: Duration,
    ) -> ChessEngineResult<PlayOutcome> {
        let mut game = Game::from_fen(fen)?;
        let human = parse_move(&game, move_text)?;
        game.apply(&human);

        let mut reply = None;
        if !game.is_game_over() {
            if let Some(mv) = self.best_move(&game, time_budget)? {
                game.apply(&mv);
                reply = Some(move_to_uci(&mv));
            }
        }

        let status = game_status(&game);
        Ok(PlayOutcome {
            fen: game.to_fen(),
            human_move: move_to_uci(&human),
            reply,
            game_over: status.is_over(),
            status,
        })
    }
}
