//! Error types for chess engine
//!
//! Provides custom error types for position parsing, move validation,
//! evaluator access and configuration. A search that runs out of time is
//! never an error, and a position without legal moves yields `Ok(None)`
//! from the search boundary.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug)]
pub enum ChessEngineError {
    /// Position text could not be parsed or describes an impossible position
    #[error("Invalid position '{fen}': {message}")]
    InvalidPosition { fen: String, message: String },

    /// Move text is not well-formed UCI
    #[error("Invalid move encoding: '{text}'")]
    InvalidMoveEncoding { text: String },

    /// Move is well-formed but not in the legal set for the position
    #[error("Illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },

    /// Value model failed to load or an inference call failed
    ///
    /// Fatal for the search invocation in flight: no retry, no fallback score.
    #[error("Evaluator unavailable: {message}")]
    EvaluatorUnavailable { message: String },

    /// Engine configuration rejected
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl ChessEngineError {
    pub(crate) fn evaluator(message: impl Into<String>) -> Self {
        Self::EvaluatorUnavailable {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
