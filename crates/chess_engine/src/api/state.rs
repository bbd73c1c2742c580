//! Game state queries

use serde::Serialize;

use crate::board::Game;

/// State of a game for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Stalemate,
    /// Any other finished game, e.g. insufficient material
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != Self::InProgress
    }
}

pub fn game_status(game: &Game) -> GameStatus {
    if game.is_checkmate() {
        GameStatus::Checkmate
    } else if game.is_stalemate() {
        GameStatus::Stalemate
    } else if game.is_game_over() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

/// Result of one human move plus the engine's reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayOutcome {
    /// Position after both moves (or after the human move if the game ended)
    pub fen: String,
    pub human_move: String,
    pub reply: Option<String>,
    pub game_over: bool,
    pub status: GameStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_of_finished_games() {
        let mate =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(game_status(&mate), GameStatus::Checkmate);

        let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game_status(&stalemate), GameStatus::Stalemate);

        let bare_kings = Game::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(game_status(&bare_kings), GameStatus::Draw);
        assert!(game_status(&bare_kings).is_over());
    }

    #[test]
    fn test_startpos_in_progress() {
        let status = game_status(&Game::startpos());
        assert_eq!(status, GameStatus::InProgress);
        assert!(!status.is_over());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in_progress\"");
    }
}
