//! Engine lifecycle and the search boundary

use std::sync::Arc;
use std::time::Duration;

use shakmaty::Move;

use crate::board::Game;
use crate::config::{EngineConfig, ModelConfig};
use crate::error::ChessEngineResult;
use crate::evaluation::{EvaluatorAdapter, LinearModel, MaterialModel, ValueModel};
use crate::hash::TranspositionTable;
use crate::search::{
    iterative_deepening, Clock, SearchLimits, SearchOutcome, Searcher, SystemClock,
};
use crate::types::Score;

/// Search entry point holding the process-wide resources
///
/// Cloning is cheap and every clone shares the same transposition table and
/// evaluator, so concurrent searches from several threads each clone the
/// engine and pass in their own [`Game`].
pub struct Engine<M> {
    pub(super) tt: Arc<TranspositionTable>,
    pub(super) evaluator: Arc<EvaluatorAdapter<M>>,
    pub(super) config: EngineConfig,
}

impl<M> Clone for Engine<M> {
    fn clone(&self) -> Self {
        Self {
            tt: Arc::clone(&self.tt),
            evaluator: Arc::clone(&self.evaluator),
            config: self.config.clone(),
        }
    }
}

impl<M: ValueModel> Engine<M> {
    /// # Errors
    ///
    /// Returns [`crate::ChessEngineError::Config`] if the config is invalid.
    pub fn new(model: M, config: EngineConfig) -> ChessEngineResult<Self> {
        config.validate()?;
        let tt = TranspositionTable::shared(config.tt_capacity)?;
        let evaluator = Arc::new(EvaluatorAdapter::new(model, config.eval_cache_capacity)?);
        Ok(Self::with_shared(tt, evaluator, config))
    }

    /// Build over resources owned elsewhere, e.g. a table shared with
    /// another engine
    pub fn with_shared(
        tt: Arc<TranspositionTable>,
        evaluator: Arc<EvaluatorAdapter<M>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            tt,
            evaluator,
            config,
        }
    }

    pub fn transposition_table(&self) -> &Arc<TranspositionTable> {
        &self.tt
    }

    pub fn evaluator(&self) -> &Arc<EvaluatorAdapter<M>> {
        &self.evaluator
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the driver on `game` in place against an injected clock
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures.
    pub fn search_with_clock<C: Clock + ?Sized>(
        &self,
        game: &mut Game,
        limits: &SearchLimits,
        clock: &C,
    ) -> ChessEngineResult<SearchOutcome> {
        let mut searcher = Searcher::new(&self.tt, &self.evaluator, self.config.max_quiescence_ply);
        iterative_deepening(&mut searcher, game, limits, clock)
    }

    /// Full search report for `game` under a wall-clock budget
    ///
    /// The search works on a private copy, so the caller's game is untouched.
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures.
    pub fn search(&self, game: &Game, time_budget: Duration) -> ChessEngineResult<SearchOutcome> {
        let mut working = game.clone();
        let limits = self.config.limits(time_budget);
        self.search_with_clock(&mut working, &limits, &SystemClock::new())
    }

    /// Best move for the side to move, or `None` if it has no legal moves
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures.
    pub fn best_move(&self, game: &Game, time_budget: Duration) -> ChessEngineResult<Option<Move>> {
        Ok(self.search(game, time_budget)?.best_move)
    }

    /// Static evaluation for the side to move
    ///
    /// # Errors
    ///
    /// Propagates evaluator failures.
    pub fn evaluate(&self, game: &Game) -> ChessEngineResult<Score> {
        self.evaluator.evaluate(game)
    }
}

/// Build an engine with the model named in `config`
///
/// # Errors
///
/// - [`crate::ChessEngineError::EvaluatorUnavailable`] if a weight file cannot be loaded
/// - [`crate::ChessEngineError::Config`] if the config is invalid
pub fn engine_from_config(config: EngineConfig) -> ChessEngineResult<Engine<Box<dyn ValueModel>>> {
    let model: Box<dyn ValueModel> = match &config.model {
        ModelConfig::Material => Box::new(MaterialModel::default()),
        ModelConfig::Linear { weights_path } => Box::new(LinearModel::load(weights_path)?),
    };
    tracing::info!("[ENGINE] Using {} model", model.name());
    Engine::new(model, config)
}
