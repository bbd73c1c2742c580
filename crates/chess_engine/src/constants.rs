//! # Engine Constants - Score Scale & Search Defaults
//!
//! Scores live on the evaluator's scale: `[-1.0, 1.0]` from the side to
//! move's point of view. Terminal positions take the extremes (`WIN_SCORE`,
//! `LOSS_SCORE`) while static evaluations are clamped to `EVAL_LIMIT`, so a
//! proven mate always outranks any evaluation.

use crate::types::Score;

/// Side to move has won
pub const WIN_SCORE: Score = 1.0;
/// Side to move has been checkmated
pub const LOSS_SCORE: Score = -1.0;
pub const DRAW_SCORE: Score = 0.0;

/// Static evaluations are clamped to `[-EVAL_LIMIT, EVAL_LIMIT]`
pub const EVAL_LIMIT: Score = 0.999;

/// Unbounded alpha-beta window edge
pub const SCORE_INF: Score = Score::INFINITY;

pub const DEFAULT_TT_CAPACITY: usize = 1 << 20;
/// Evaluator results kept in the LRU cache
pub const DEFAULT_EVAL_CACHE_CAPACITY: usize = 20_000;
pub const DEFAULT_MAX_QUIESCENCE_PLY: u32 = 8;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1_000;

/// Material scale for `MaterialModel`: `tanh(balance / scale)`
pub const MATERIAL_SCALE: f32 = 10.0;

/// Evaluator input is an 8x8 board with 17 feature planes
pub const BOARD_DIM: usize = 8;
pub const TENSOR_PLANES: usize = 17;
pub const TENSOR_LEN: usize = BOARD_DIM * BOARD_DIM * TENSOR_PLANES;

pub const PLANE_SIDE_TO_MOVE: usize = 12;
pub const PLANE_WHITE_KINGSIDE: usize = 13;
pub const PLANE_WHITE_QUEENSIDE: usize = 14;
pub const PLANE_BLACK_KINGSIDE: usize = 15;
pub const PLANE_BLACK_QUEENSIDE: usize = 16;

/// Pawn, knight, bishop, rook, queen, king
pub const PIECE_VALUES: [f32; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
