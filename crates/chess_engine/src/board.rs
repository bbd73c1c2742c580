//! Rules adapter over `shakmaty`
//!
//! The search never inspects board internals directly: everything it needs
//! (legal moves, captures, apply/undo, terminal detection, FEN and the
//! normalized cache key) goes through [`Game`].
//!
//! `apply`/`undo` form a strict stack. Each `apply` snapshots the prior
//! position, so `undo` restores it exactly, counters and castling rights
//! included.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use crate::constants::STARTPOS_FEN;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::hash::PositionKey;
use crate::types::GameResult;

/// A position plus the undo stack of positions that led to it
#[derive(Debug, Clone)]
pub struct Game {
    current: Chess,
    history: Vec<Chess>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Chess::default())
    }
}

impl Game {
    /// Wrap a position with an empty undo stack
    pub fn new(position: Chess) -> Self {
        Self {
            current: position,
            history: Vec::new(),
        }
    }

    /// Parse a FEN string
    ///
    /// # Errors
    ///
    /// Returns [`ChessEngineError::InvalidPosition`] if the text is not FEN
    /// or describes an impossible position.
    pub fn from_fen(text: &str) -> ChessEngineResult<Self> {
        let text = text.trim();
        let invalid = |message: String| ChessEngineError::InvalidPosition {
            fen: text.to_string(),
            message,
        };

        let fen: Fen = text.parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;

        Ok(Self::new(position))
    }

    pub fn startpos() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Chess {
        &self.current
    }

    pub fn turn(&self) -> Color {
        self.current.turn()
    }

    /// Number of moves currently applied on the undo stack
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Legal moves in the order the rules library generates them
    pub fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves().into_iter().collect()
    }

    /// Legal capturing moves, generation order preserved
    pub fn capture_moves(&self) -> Vec<Move> {
        self.current
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_capture())
            .collect()
    }

    /// Play a legal move, remembering the prior position for [`Game::undo`]
    pub fn apply(&mut self, mv: &Move) {
        let previous = self.current.clone();
        self.current.play_unchecked(mv.clone());
        self.history.push(previous);
    }

    /// Take back the most recent move. Returns `false` on an empty stack.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Undo moves until only `ply` remain applied
    pub fn unwind_to(&mut self, ply: usize) {
        while self.history.len() > ply {
            self.undo();
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.current.is_game_over()
    }

    pub fn is_checkmate(&self) -> bool {
        self.current.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.current.is_stalemate()
    }

    /// Outcome relative to the side to move
    ///
    /// At a terminal node the side to move has no legal continuation, so a
    /// checkmate is always a loss for it. Every other finished game is a draw.
    pub fn result(&self) -> GameResult {
        if self.current.is_checkmate() {
            GameResult::OpponentWins
        } else if self.current.is_game_over() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Full FEN, move counters included
    pub fn to_fen(&self) -> String {
        Fen::from_position(&self.current, EnPassantMode::Legal).to_string()
    }

    /// Cache identity: FEN without the halfmove and fullmove counters
    pub fn key(&self) -> PositionKey {
        PositionKey::from_fen(&self.to_fen())
    }

    /// Decode UCI move text against this position
    ///
    /// # Errors
    ///
    /// - [`ChessEngineError::InvalidMoveEncoding`] for malformed text
    /// - [`ChessEngineError::IllegalMove`] when the move is not legal here
    pub fn parse_uci(&self, text: &str) -> ChessEngineResult<Move> {
        let text = text.trim();
        if !is_uci_syntax(text) {
            return Err(ChessEngineError::InvalidMoveEncoding {
                text: text.to_string(),
            });
        }

        let wanted = text.to_ascii_lowercase();
        self.legal_moves()
            .into_iter()
            .find(|mv| move_to_uci(mv) == wanted)
            .ok_or_else(|| ChessEngineError::IllegalMove {
                uci: text.to_string(),
                fen: self.to_fen(),
            })
    }
}

/// `<from><to>[promotion]` with squares `a1`..`h8`
fn is_uci_syntax(text: &str) -> bool {
    let bytes = text.as_bytes();
    let square = |file: u8, rank: u8| {
        (b'a'..=b'h').contains(&file.to_ascii_lowercase()) && (b'1'..=b'8').contains(&rank)
    };
    match bytes {
        [f1, r1, f2, r2] => square(*f1, *r1) && square(*f2, *r2),
        [f1, r1, f2, r2, promo] => {
            square(*f1, *r1)
                && square(*f2, *r2)
                && matches!(promo.to_ascii_lowercase(), b'q' | b'r' | b'b' | b'n')
        }
        _ => false,
    }
}

/// UCI text for a move (`e2e4`, `e7e8q`, `e1g1`)
pub fn move_to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// The standard initial position as FEN
pub fn startpos_fen() -> &'static str {
    STARTPOS_FEN
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1. f3 e5 2. g4 Qh4#
    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

    #[test]
    fn test_startpos_has_twenty_moves() {
        let game = Game::startpos();
        assert_eq!(game.legal_moves().len(), 20);
        assert!(game.capture_moves().is_empty(), "No captures at the start");
        assert_eq!(game.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn test_apply_undo_restores_exact_position() {
        let mut game = Game::startpos();
        let before = game.to_fen();

        for mv in game.legal_moves() {
            game.apply(&mv);
            assert_eq!(game.ply(), 1);
            assert!(game.undo(), "Undo should pop the applied move");
            assert_eq!(game.to_fen(), before, "Undo must restore the exact FEN");
        }

        assert!(!game.undo(), "Undo on an empty stack reports false");
    }

    #[test]
    fn test_unwind_to_restores_root() {
        let mut game = Game::startpos();
        let root = game.to_fen();

        for _ in 0..4 {
            let mv = game.legal_moves()[0].clone();
            game.apply(&mv);
        }
        assert_eq!(game.ply(), 4);

        game.unwind_to(0);
        assert_eq!(game.ply(), 0);
        assert_eq!(game.to_fen(), root);
    }

    #[test]
    fn test_checkmate_result_is_loss_for_side_to_move() {
        let game = Game::from_fen(FOOLS_MATE).unwrap();
        assert!(game.is_game_over());
        assert!(game.is_checkmate());
        assert_eq!(
            game.result(),
            GameResult::OpponentWins,
            "The mated side is the side to move"
        );
    }

    #[test]
    fn test_stalemate_result_is_draw() {
        let game = Game::from_fen(STALEMATE).unwrap();
        assert!(game.is_stalemate());
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.result(), GameResult::Draw);
    }

    #[test]
    fn test_key_ignores_move_counters() {
        let a = Game::from_fen("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1").unwrap();
        let b = Game::from_fen("8/8/8/4k3/8/8/4P3/4K3 w - - 37 80").unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().as_str(), "8/8/8/4k3/8/8/4P3/4K3 w - -");
    }

    #[test]
    fn test_invalid_fen_is_rejected() {
        let err = Game::from_fen("not a position").unwrap_err();
        assert!(matches!(err, ChessEngineError::InvalidPosition { .. }));
    }

    #[test]
    fn test_parse_uci_distinguishes_malformed_and_illegal() {
        let game = Game::startpos();

        let mv = game.parse_uci("e2e4").unwrap();
        assert_eq!(move_to_uci(&mv), "e2e4");

        assert!(matches!(
            game.parse_uci("zz99"),
            Err(ChessEngineError::InvalidMoveEncoding { .. })
        ));
        assert!(matches!(
            game.parse_uci("e2e5"),
            Err(ChessEngineError::IllegalMove { .. })
        ));
    }
}
