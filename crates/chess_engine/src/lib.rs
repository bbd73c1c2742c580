//! Neural-evaluated chess search engine
//!
//! Picks a move for the side to move under a wall-clock budget by combining
//! iterative-deepening negamax with a learned position evaluator.
//!
//! ## Module Organization
//!
//! - `board` - Rules adapter: legal moves, apply/undo stack, results, FEN
//! - `hash` - Normalized position keys and the shared transposition table
//! - `evaluation` - Evaluator adapter, tensor encoding and value models
//! - `search` - Move ordering, quiescence, negamax and iterative deepening
//! - `api` - Search boundary (`best_move`) and the play-move request flow
//! - `config` - Engine configuration
//! - `error` - Error taxonomy

pub mod api;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod search;
pub mod types;

pub use api::{engine_from_config, game_status, parse_move, Engine, GameStatus, PlayOutcome};
pub use board::Game;
pub use config::{EngineConfig, ModelConfig};
pub use error::{ChessEngineError, ChessEngineResult};
pub use evaluation::{BoardTensor, EvaluatorAdapter, LinearModel, MaterialModel, ValueModel};
pub use hash::{Bound, PositionKey, TranspositionTable, TtEntry};
pub use search::{
    Clock, IterationReport, SearchLimits, SearchOutcome, SearchStats, Searcher, SteppingClock,
    SystemClock,
};
pub use types::{GameResult, Score};
