//! Iterative deepening search
//!
//! The driver scans every root move at depth 1, 2, 3, ... and checks the
//! clock once before each depth. A depth that has started always runs to
//! completion, so one slow depth can overrun the budget.

use shakmaty::Move;
use tracing::{debug, info, warn};

use super::alphabeta::Searcher;
use super::clock::Clock;
use super::ordering::order_moves;
use super::session::{RootBest, SearchLimits, SearchOutcome, SearchSession};
use crate::board::{move_to_uci, Game};
use crate::constants::SCORE_INF;
use crate::error::ChessEngineResult;
use crate::evaluation::ValueModel;
use crate::types::Score;

/// Score of one root move from the root side's perspective
#[derive(Debug, Clone, PartialEq)]
pub struct RootScore {
    pub mv: Move,
    pub score: Score,
}

/// First root move with the highest score
pub fn best_root(scores: &[RootScore]) -> Option<&RootScore> {
    scores
        .iter()
        .fold(None, |best: Option<&RootScore>, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
}

impl<M: ValueModel> Searcher<'_, M> {
    /// Full-window scan of `moves` at `depth`
    ///
    /// Each move is applied, its child searched at `depth - 1` and the score
    /// negated back to the root's perspective.
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures; the board is restored to the root first.
    pub fn search_root(
        &mut self,
        game: &mut Game,
        moves: &[Move],
        depth: u32,
    ) -> ChessEngineResult<Vec<RootScore>> {
        let root_ply = game.ply();
        let mut scores = Vec::with_capacity(moves.len());

        for mv in moves {
            game.apply(mv);
            let child = self.negamax(game, depth.saturating_sub(1), -SCORE_INF, SCORE_INF);
            game.unwind_to(root_ply);
            scores.push(RootScore {
                mv: mv.clone(),
                score: -child?,
            });
        }

        Ok(scores)
    }
}

/// Deepen until the clock says stop, returning the best root move found
///
/// A root with no legal moves returns immediately with no move and without
/// consulting the evaluator.
///
/// # Errors
///
/// Propagates evaluator failures. The board is left as it was on entry.
pub fn iterative_deepening<M, C>(
    searcher: &mut Searcher<'_, M>,
    game: &mut Game,
    limits: &SearchLimits,
    clock: &C,
) -> ChessEngineResult<SearchOutcome>
where
    M: ValueModel,
    C: Clock + ?Sized,
{
    let started = clock.now();
    let mut session = SearchSession::new(started, limits.time_budget);

    let root_moves = order_moves(game.legal_moves());
    if root_moves.is_empty() {
        info!("[SEARCH] No legal moves in {}", game.to_fen());
        let elapsed = session.elapsed(clock.now());
        return Ok(session.finish(searcher.stats(), elapsed));
    }

    let mut depth = 1;
    loop {
        if limits.max_depth.is_some_and(|max| depth > max) {
            break;
        }
        if !session.may_start_depth(clock.now()) {
            break;
        }

        session.begin_depth();
        let scores = searcher.search_root(game, &root_moves, depth)?;
        for root in &scores {
            if session.offer(&root.mv, root.score, depth) {
                debug!(
                    "[SEARCH] depth {} new best {} ({:.4})",
                    depth,
                    move_to_uci(&root.mv),
                    root.score
                );
            }
        }

        let Some(depth_best) = best_root(&scores) else {
            break;
        };
        let depth_best = RootBest {
            mv: depth_best.mv.clone(),
            score: depth_best.score,
            depth,
        };
        let elapsed = session.elapsed(clock.now());
        let nodes = searcher.stats().nodes;
        let report = session.complete_depth(depth, &depth_best, elapsed, nodes);
        debug!(
            "[SEARCH] depth {} done: {} ({:.4}), best {} ({:.4}), {} nodes, {:?}",
            report.depth,
            report.depth_best,
            report.depth_score,
            report.best_move,
            report.best_score,
            report.nodes,
            report.elapsed
        );

        depth += 1;
    }

    let elapsed = session.elapsed(clock.now());
    if elapsed > limits.time_budget {
        warn!(
            "[SEARCH] Depth {} overran the {:?} budget ({:?})",
            session.depth(),
            limits.time_budget,
            elapsed
        );
    }

    let outcome = session.finish(searcher.stats(), elapsed);
    info!(
        "[SEARCH] bestmove {} score {:?} depth {} nodes {} qnodes {} tt_hits {} in {:?}",
        outcome.best_move_uci().unwrap_or_else(|| "(none)".to_string()),
        outcome.score,
        outcome.depth,
        outcome.stats.nodes,
        outcome.stats.quiescence_nodes,
        outcome.stats.tt_hits,
        outcome.elapsed
    );
    Ok(outcome)
}
