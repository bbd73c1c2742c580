//! Negamax with alpha-beta pruning (ITERATIVE VERSION - No recursion)
//!
//! Recursion is simulated with an explicit stack of [`SearchFrame`]s, one per
//! node on the current path. The board is mutated in place: a frame applies a
//! move before pushing its child and undoes it when the child's score comes
//! back, so the board always matches the top frame.
//!
//! Scores are from the perspective of the side to move at each frame. A child
//! reports its own score and the parent negates it.

use shakmaty::Move;

use super::ordering::order_moves;
use super::session::SearchStats;
use crate::board::Game;
use crate::constants::{DRAW_SCORE, LOSS_SCORE, SCORE_INF};
use crate::error::ChessEngineResult;
use crate::evaluation::{EvaluatorAdapter, ValueModel};
use crate::hash::{Bound, PositionKey, TranspositionTable, TtEntry};
use crate::types::{GameResult, Score};

/// Fixed score of a finished game for the side that would move next
pub fn terminal_score(result: GameResult) -> Score {
    match result {
        GameResult::OpponentWins => LOSS_SCORE,
        GameResult::Draw | GameResult::InProgress => DRAW_SCORE,
    }
}

/// Search state for one session: shared resources plus private counters
pub struct Searcher<'a, M> {
    pub(super) tt: &'a TranspositionTable,
    pub(super) evaluator: &'a EvaluatorAdapter<M>,
    pub(super) max_quiescence_ply: u32,
    pub(super) stats: SearchStats,
}

/// Stack frame for iterative negamax
///
/// Each frame represents one "recursive call".
struct SearchFrame {
    depth: u32,
    alpha: Score,
    /// Window lower edge on entry, for bound classification
    alpha_orig: Score,
    beta: Score,
    key: Option<PositionKey>,
    moves: Vec<Move>,
    move_index: usize,
    best_score: Score,
    expanded: bool,
    returning_score: Option<Score>,
}

impl SearchFrame {
    fn new(depth: u32, alpha: Score, beta: Score) -> Self {
        Self {
            depth,
            alpha,
            alpha_orig: alpha,
            beta,
            key: None,
            moves: Vec::new(),
            move_index: 0,
            best_score: -SCORE_INF,
            expanded: false,
            returning_score: None,
        }
    }
}

/// Pop the finished frame and hand its score to the parent.
/// Returns the score when the root frame finished.
pub(super) fn return_to_parent<F>(
    stack: &mut Vec<F>,
    score: Score,
    deliver: impl FnOnce(&mut F, Score),
) -> Option<Score> {
    stack.pop();
    match stack.last_mut() {
        Some(parent) => {
            deliver(parent, score);
            None
        }
        None => Some(score),
    }
}

impl<'a, M: ValueModel> Searcher<'a, M> {
    pub fn new(
        tt: &'a TranspositionTable,
        evaluator: &'a EvaluatorAdapter<M>,
        max_quiescence_ply: u32,
    ) -> Self {
        Self {
            tt,
            evaluator,
            max_quiescence_ply,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Score of `game` searched `depth` plies deep inside `(alpha, beta)`
    ///
    /// On error the board is unwound to the ply it had on entry before the
    /// error is returned; nothing below this call swallows errors.
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures from any node.
    pub fn negamax(
        &mut self,
        game: &mut Game,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> ChessEngineResult<Score> {
        let entry_ply = game.ply();
        let result = self.negamax_frames(game, depth, alpha, beta);
        if result.is_err() {
            game.unwind_to(entry_ply);
        }
        result
    }

    fn negamax_frames(
        &mut self,
        game: &mut Game,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> ChessEngineResult<Score> {
        let deliver = |parent: &mut SearchFrame, score: Score| parent.returning_score = Some(score);
        let mut stack = vec![SearchFrame::new(depth, alpha, beta)];

        while let Some(frame) = stack.last_mut() {
            // === PHASE 1: Frame Initialization (first visit) ===
            if !frame.expanded {
                frame.expanded = true;
                self.stats.nodes += 1;

                let key = game.key();
                let cached = self
                    .tt
                    .probe(&key)
                    .and_then(|entry| entry.usable_score(frame.depth, frame.alpha, frame.beta));
                if let Some(score) = cached {
                    self.stats.tt_hits += 1;
                    if let Some(root) = return_to_parent(&mut stack, score, deliver) {
                        return Ok(root);
                    }
                    continue;
                }

                // Terminal positions are never stored
                if game.is_game_over() {
                    let score = terminal_score(game.result());
                    if let Some(root) = return_to_parent(&mut stack, score, deliver) {
                        return Ok(root);
                    }
                    continue;
                }

                if frame.depth == 0 {
                    let score = self.quiescence(game, frame.alpha, frame.beta)?;
                    if let Some(root) = return_to_parent(&mut stack, score, deliver) {
                        return Ok(root);
                    }
                    continue;
                }

                frame.moves = order_moves(game.legal_moves());
                frame.key = Some(key);
                continue;
            }

            // === PHASE 2: Process Returning Score from Child ===
            if let Some(child_score) = frame.returning_score.take() {
                game.undo();
                let score = -child_score;

                if score > frame.best_score {
                    frame.best_score = score;
                }
                frame.alpha = frame.alpha.max(frame.best_score);

                // Beta cutoff: skip the remaining moves
                if frame.alpha >= frame.beta {
                    self.stats.cutoffs += 1;
                    frame.move_index = frame.moves.len();
                }
            }

            // === PHASE 3: Try Next Move ===
            if frame.move_index < frame.moves.len() {
                let child = SearchFrame::new(frame.depth - 1, -frame.beta, -frame.alpha);
                game.apply(&frame.moves[frame.move_index]);
                frame.move_index += 1;
                stack.push(child);
                continue;
            }

            // === PHASE 4: All Moves Processed - Store and Return ===
            let best = frame.best_score;
            let entry = TtEntry {
                depth: frame.depth,
                score: best,
                bound: Bound::classify(best, frame.alpha_orig, frame.beta),
            };
            if let Some(key) = frame.key.take() {
                self.tt.store(key, entry);
            }

            if let Some(root) = return_to_parent(&mut stack, best, deliver) {
                return Ok(root);
            }
        }

        unreachable!("the root frame always returns before the stack empties")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WIN_SCORE;
    use crate::evaluation::MaterialModel;

    const BACK_RANK_MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

    fn fixtures() -> (TranspositionTable, EvaluatorAdapter<MaterialModel>) {
        (
            TranspositionTable::new(1 << 16).unwrap(),
            EvaluatorAdapter::new(MaterialModel::default(), 1 << 16).unwrap(),
        )
    }

    #[test]
    fn test_terminal_score_follows_side_to_move() {
        assert_eq!(terminal_score(GameResult::OpponentWins), LOSS_SCORE);
        assert_eq!(terminal_score(GameResult::Draw), DRAW_SCORE);
    }

    #[test]
    fn test_checkmated_side_scores_loss() {
        let (tt, eval) = fixtures();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::from_fen(FOOLS_MATE).unwrap();

        let score = searcher.negamax(&mut game, 3, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(score, LOSS_SCORE);
        assert_eq!(eval.model_calls(), 0, "Terminal nodes are not evaluated");
    }

    #[test]
    fn test_stalemate_scores_draw() {
        let (tt, eval) = fixtures();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::from_fen(STALEMATE).unwrap();

        let score = searcher.negamax(&mut game, 2, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(score, DRAW_SCORE);
    }

    #[test]
    fn test_mate_in_one_scores_win() {
        let (tt, eval) = fixtures();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::from_fen(BACK_RANK_MATE_IN_ONE).unwrap();

        let score = searcher.negamax(&mut game, 1, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(score, WIN_SCORE);
        assert_eq!(game.ply(), 0, "Board must be restored after the search");
    }

    #[test]
    fn test_negamax_matches_negated_children() {
        let (tt, eval) = fixtures();
        let mut game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/3QK3 w - - 0 1").unwrap();

        let mut searcher = Searcher::new(&tt, &eval, 8);
        let parent = searcher.negamax(&mut game, 2, -SCORE_INF, SCORE_INF).unwrap();

        let mut best = -SCORE_INF;
        for mv in game.legal_moves() {
            let child_tt = TranspositionTable::new(1 << 16).unwrap();
            let mut child_searcher = Searcher::new(&child_tt, &eval, 8);
            game.apply(&mv);
            let child = child_searcher
                .negamax(&mut game, 1, -SCORE_INF, SCORE_INF)
                .unwrap();
            game.undo();
            best = best.max(-child);
        }

        assert!((parent - best).abs() < 1e-6, "parent {parent} vs children {best}");
    }

    #[test]
    fn test_full_window_result_is_stored_exact() {
        let (tt, eval) = fixtures();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::startpos();

        let score = searcher.negamax(&mut game, 2, -SCORE_INF, SCORE_INF).unwrap();
        let entry = tt.probe(&game.key()).expect("root should be stored");
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.bound, Bound::Exact);
        assert_eq!(entry.score, score);
    }

    #[test]
    fn test_repeat_search_hits_cache_with_same_score() {
        let (tt, eval) = fixtures();
        let mut game = Game::startpos();

        let mut first = Searcher::new(&tt, &eval, 8);
        let cold = first.negamax(&mut game, 2, -SCORE_INF, SCORE_INF).unwrap();

        let mut second = Searcher::new(&tt, &eval, 8);
        let warm = second.negamax(&mut game, 2, -SCORE_INF, SCORE_INF).unwrap();

        assert_eq!(cold, warm);
        assert_eq!(second.stats().nodes, 1, "Root entry should answer immediately");
        assert_eq!(second.stats().tt_hits, 1);
    }

    #[test]
    fn test_narrow_window_produces_cutoffs() {
        let (tt, eval) = fixtures();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::startpos();

        searcher.negamax(&mut game, 3, -0.01, 0.01).unwrap();
        assert!(searcher.stats().cutoffs > 0);
        assert_eq!(game.ply(), 0);
    }
}
