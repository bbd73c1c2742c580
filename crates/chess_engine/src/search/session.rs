//! Search session state
//!
//! A [`SearchSession`] lives for exactly one driver invocation: it owns the
//! depth counter, the start time and deadline (as clock offsets), the best
//! root move so far and a report per completed depth.
//!
//! The best move survives from one depth to the next, but the score it must
//! beat is reset when a depth starts: the first root move scanned at a new
//! depth always replaces it, so after a full scan the best move is that
//! depth's own choice.

use std::time::Duration;

use shakmaty::Move;

use crate::board::move_to_uci;
use crate::constants::DEFAULT_TIME_BUDGET_MS;
use crate::types::Score;

/// Node counters for one search invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Negamax nodes visited
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
    /// Evaluator requests, cache hits included
    pub evaluations: u64,
}

/// What bounds a driver invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub time_budget: Duration,
    /// Optional ceiling; `None` deepens until the budget is spent
    pub max_depth: Option<u32>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
            max_depth: None,
        }
    }
}

impl SearchLimits {
    pub fn time(time_budget: Duration) -> Self {
        Self {
            time_budget,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootBest {
    pub mv: Move,
    pub score: Score,
    /// Depth at which this move was adopted
    pub depth: u32,
}

/// Summary of one fully scanned depth
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    pub depth: u32,
    /// Best move of this depth's scan alone
    pub depth_best: String,
    pub depth_score: Score,
    /// Session best after this depth
    pub best_move: String,
    pub best_score: Score,
    pub elapsed: Duration,
    pub nodes: u64,
}

#[derive(Debug)]
pub struct SearchSession {
    depth: u32,
    started: Duration,
    deadline: Duration,
    best: Option<RootBest>,
    /// Score to beat within the depth being scanned
    depth_score: Option<Score>,
    iterations: Vec<IterationReport>,
}

impl SearchSession {
    pub fn new(started: Duration, budget: Duration) -> Self {
        Self {
            depth: 0,
            started,
            deadline: started + budget,
            best: None,
            depth_score: None,
            iterations: Vec::new(),
        }
    }

    /// Last fully scanned depth (0 before the first)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }

    /// Coarse cancellation point, consulted once before each depth
    ///
    /// Depth 1 always runs so a position with legal moves yields a move.
    pub fn may_start_depth(&self, now: Duration) -> bool {
        self.depth == 0 || now < self.deadline
    }

    /// Start scanning a new depth: forget the score to beat, keep the move
    pub fn begin_depth(&mut self) {
        self.depth_score = None;
    }

    /// Offer a root move; it becomes the session best if it strictly
    /// improves on the best score seen so far in the current depth.
    pub fn offer(&mut self, mv: &Move, score: Score, depth: u32) -> bool {
        let improves = self.depth_score.map_or(true, |best| score > best);
        if improves {
            self.depth_score = Some(score);
            self.best = Some(RootBest {
                mv: mv.clone(),
                score,
                depth,
            });
        }
        improves
    }

    pub fn best(&self) -> Option<&RootBest> {
        self.best.as_ref()
    }

    pub fn complete_depth(
        &mut self,
        depth: u32,
        depth_best: &RootBest,
        elapsed: Duration,
        nodes: u64,
    ) -> &IterationReport {
        self.depth = depth;
        let (best_move, best_score) = match &self.best {
            Some(best) => (move_to_uci(&best.mv), best.score),
            None => (move_to_uci(&depth_best.mv), depth_best.score),
        };
        self.iterations.push(IterationReport {
            depth,
            depth_best: move_to_uci(&depth_best.mv),
            depth_score: depth_best.score,
            best_move,
            best_score,
            elapsed,
            nodes,
        });
        &self.iterations[self.iterations.len() - 1]
    }

    pub fn finish(self, stats: SearchStats, elapsed: Duration) -> SearchOutcome {
        SearchOutcome {
            best_move: self.best.as_ref().map(|best| best.mv.clone()),
            score: self.best.as_ref().map(|best| best.score),
            depth: self.depth,
            iterations: self.iterations,
            stats,
            elapsed,
        }
    }
}

/// Result of a driver invocation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// `None` only when the root position has no legal moves
    pub best_move: Option<Move>,
    pub score: Option<Score>,
    /// Deepest fully scanned depth
    pub depth: u32,
    pub iterations: Vec<IterationReport>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn best_move_uci(&self) -> Option<String> {
        self.best_move.as_ref().map(move_to_uci)
    }
}
