//! Public API for the chess engine
//!
//! The search boundary plus the request flow a front end drives.
//!
//! ## Module Organization
//!
//! - `game` - [`Engine`]: shared resources and `best_move`
//! - `moves` - Move decoding and the play-move flow
//! - `state` - Game state queries

mod game;
mod moves;
mod state;

pub use game::{engine_from_config, Engine};
pub use moves::{is_legal_move, parse_move};
pub use state::{game_status, GameStatus, PlayOutcome};
