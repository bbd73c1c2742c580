//! Quiescence search to avoid horizon effect
//!
//! Runs at the leaves of the main search and only follows captures, so a
//! leaf is never scored in the middle of an exchange. Like the main search it
//! walks an explicit frame stack instead of recursing, and the extension is
//! capped at `max_quiescence_ply` plies below the leaf.

use shakmaty::Move;

use super::alphabeta::{return_to_parent, terminal_score, Searcher};
use crate::board::Game;
use crate::error::ChessEngineResult;
use crate::evaluation::ValueModel;
use crate::types::Score;

/// Stack frame for iterative quiescence search
struct QuiescenceFrame {
    alpha: Score,
    beta: Score,
    ply: u32,
    moves: Vec<Move>,
    move_index: usize,
    expanded: bool,
    returning_score: Option<Score>,
}

impl QuiescenceFrame {
    fn new(alpha: Score, beta: Score, ply: u32) -> Self {
        Self {
            alpha,
            beta,
            ply,
            moves: Vec::new(),
            move_index: 0,
            expanded: false,
            returning_score: None,
        }
    }
}

impl<M: ValueModel> Searcher<'_, M> {
    /// Capture-only search with a stand-pat lower bound, fail-hard
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures. The board is unwound to its entry ply
    /// before the error is returned.
    pub fn quiescence(
        &mut self,
        game: &mut Game,
        alpha: Score,
        beta: Score,
    ) -> ChessEngineResult<Score> {
        let entry_ply = game.ply();
        let result = self.quiescence_frames(game, alpha, beta);
        if result.is_err() {
            game.unwind_to(entry_ply);
        }
        result
    }

    fn quiescence_frames(
        &mut self,
        game: &mut Game,
        alpha: Score,
        beta: Score,
    ) -> ChessEngineResult<Score> {
        let deliver =
            |parent: &mut QuiescenceFrame, score: Score| parent.returning_score = Some(score);
        let mut stack = vec![QuiescenceFrame::new(alpha, beta, 0)];

        while let Some(frame) = stack.last_mut() {
            // === PHASE 1: Stand pat ===
            if !frame.expanded {
                frame.expanded = true;
                self.stats.quiescence_nodes += 1;

                if game.is_game_over() {
                    let score = terminal_score(game.result());
                    if let Some(root) = return_to_parent(&mut stack, score, deliver) {
                        return Ok(root);
                    }
                    continue;
                }

                self.stats.evaluations += 1;
                let stand_pat = self.evaluator.evaluate(game)?;

                if stand_pat >= frame.beta {
                    let beta = frame.beta;
                    if let Some(root) = return_to_parent(&mut stack, beta, deliver) {
                        return Ok(root);
                    }
                    continue;
                }
                frame.alpha = frame.alpha.max(stand_pat);

                // Extension limit reached: the stand-pat bound is the answer
                if frame.ply >= self.max_quiescence_ply {
                    let alpha = frame.alpha;
                    if let Some(root) = return_to_parent(&mut stack, alpha, deliver) {
                        return Ok(root);
                    }
                    continue;
                }

                frame.moves = game.capture_moves();
                continue;
            }

            // === PHASE 2: Process Returning Score from Child ===
            if let Some(child_score) = frame.returning_score.take() {
                game.undo();
                let score = -child_score;

                if score >= frame.beta {
                    let beta = frame.beta;
                    if let Some(root) = return_to_parent(&mut stack, beta, deliver) {
                        return Ok(root);
                    }
                    continue;
                }
                frame.alpha = frame.alpha.max(score);
            }

            // === PHASE 3: Try Next Capture ===
            if frame.move_index < frame.moves.len() {
                let child = QuiescenceFrame::new(-frame.beta, -frame.alpha, frame.ply + 1);
                game.apply(&frame.moves[frame.move_index]);
                frame.move_index += 1;
                stack.push(child);
                continue;
            }

            // === PHASE 4: No capture left ===
            let alpha = frame.alpha;
            if let Some(root) = return_to_parent(&mut stack, alpha, deliver) {
                return Ok(root);
            }
        }

        unreachable!("the root frame always returns before the stack empties")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EVAL_LIMIT, LOSS_SCORE, SCORE_INF};
    use crate::evaluation::{EvaluatorAdapter, MaterialModel};
    use crate::hash::TranspositionTable;

    /// White knight can take a hanging queen; nothing recaptures.
    const HANGING_QUEEN: &str = "k7/7p/8/4q3/8/5N2/P7/7K w - - 0 1";

    fn material(balance: f32) -> Score {
        (balance / 10.0).tanh()
    }

    #[test]
    fn test_quiet_position_returns_stand_pat() {
        let tt = TranspositionTable::new(1024).unwrap();
        let eval = EvaluatorAdapter::new(MaterialModel::default(), 1024).unwrap();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::startpos();

        let score = searcher.quiescence(&mut game, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(searcher.stats().quiescence_nodes, 1);
    }

    #[test]
    fn test_winning_capture_is_resolved() {
        let tt = TranspositionTable::new(1024).unwrap();
        let eval = EvaluatorAdapter::new(MaterialModel::default(), 1024).unwrap();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game = Game::from_fen(HANGING_QUEEN).unwrap();

        let score = searcher.quiescence(&mut game, -SCORE_INF, SCORE_INF).unwrap();
        assert!((score - material(3.0)).abs() < 1e-6, "got {score}");
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_stand_pat_above_beta_fails_hard() {
        let tt = TranspositionTable::new(1024).unwrap();
        let eval = EvaluatorAdapter::new(MaterialModel::default(), 1024).unwrap();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        // Black to move, a full queen down
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        let mut flipped = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();

        let score = searcher.quiescence(&mut flipped, -SCORE_INF, 0.1).unwrap();
        assert_eq!(score, 0.1);
        let score = searcher.quiescence(&mut game, -0.5, SCORE_INF).unwrap();
        assert_eq!(score, -0.5, "No capture lifts a losing stand pat above alpha");
    }

    #[test]
    fn test_ply_limit_stops_at_stand_pat() {
        let tt = TranspositionTable::new(1024).unwrap();
        let eval = EvaluatorAdapter::new(MaterialModel::default(), 1024).unwrap();
        let mut searcher = Searcher::new(&tt, &eval, 0);
        let mut game = Game::from_fen(HANGING_QUEEN).unwrap();

        let score = searcher.quiescence(&mut game, -SCORE_INF, SCORE_INF).unwrap();
        assert!((score - material(-6.0)).abs() < 1e-6, "got {score}");
        assert_eq!(searcher.stats().quiescence_nodes, 1);
    }

    #[test]
    fn test_checkmate_is_scored_without_evaluation() {
        let tt = TranspositionTable::new(1024).unwrap();
        let eval = EvaluatorAdapter::new(MaterialModel::default(), 1024).unwrap();
        let mut searcher = Searcher::new(&tt, &eval, 8);
        let mut game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();

        let score = searcher.quiescence(&mut game, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(score, LOSS_SCORE);
        assert_eq!(eval.model_calls(), 0);
        assert!(LOSS_SCORE < -EVAL_LIMIT);
    }
}
