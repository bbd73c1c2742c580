//! Time-bounded negamax search
//!
//! This module implements the core AI search using:
//! - Negamax variant of alpha-beta pruning (ITERATIVE - explicit frame stack)
//! - Iterative deepening against an injectable clock
//! - A shared, bound-tagged transposition table
//! - Captures-first move ordering
//! - Quiescence search over captures at the horizon
//!
//! ## Module Organization
//!
//! - `alphabeta` - Negamax core and the [`Searcher`] that owns a session's stats
//! - `quiescence` - Capture-only extension at depth 0
//! - `ordering` - Move ordering heuristics
//! - `iterative` - Iterative deepening driver and root scan
//! - `session` - Per-invocation search state and reports
//! - `clock` - Wall and synthetic clocks

mod alphabeta;
mod clock;
mod iterative;
mod ordering;
mod quiescence;
mod session;

pub use alphabeta::{terminal_score, Searcher};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use iterative::{best_root, iterative_deepening, RootScore};
pub use ordering::order_moves;
pub use session::{
    IterationReport, RootBest, SearchLimits, SearchOutcome, SearchSession, SearchStats,
};
