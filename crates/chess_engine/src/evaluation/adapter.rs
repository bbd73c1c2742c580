//! Evaluator adapter
//!
//! Boundary between the search and the value model. Holds two locks that are
//! never nested:
//! - `cache`: bounded LRU of white-relative values by normalized key
//! - `gate`: the model itself, so at most one inference runs at a time no
//!   matter how many searches are in flight
//!
//! There is no timeout on a model call; a hung model stalls its caller.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use shakmaty::Color;

use super::model::ValueModel;
use super::tensor::BoardTensor;
use crate::board::Game;
use crate::constants::EVAL_LIMIT;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::hash::PositionKey;
use crate::types::Score;

pub struct EvaluatorAdapter<M> {
    gate: Mutex<M>,
    cache: Mutex<LruCache<PositionKey, Score>>,
    model_calls: AtomicU64,
    cache_hits: AtomicU64,
}

impl<M: ValueModel> EvaluatorAdapter<M> {
    /// # Errors
    ///
    /// Returns [`ChessEngineError::Config`] for a zero cache capacity.
    pub fn new(model: M, cache_capacity: usize) -> ChessEngineResult<Self> {
        let capacity = NonZeroUsize::new(cache_capacity)
            .ok_or_else(|| ChessEngineError::config("evaluation cache capacity must be > 0"))?;
        Ok(Self {
            gate: Mutex::new(model),
            cache: Mutex::new(LruCache::new(capacity)),
            model_calls: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        })
    }

    /// Score for the side to move
    ///
    /// # Errors
    ///
    /// Returns [`ChessEngineError::EvaluatorUnavailable`] if the model fails
    /// or produces a non-finite value.
    pub fn evaluate(&self, game: &Game) -> ChessEngineResult<Score> {
        let white = self.evaluate_white(game)?;
        Ok(match game.turn() {
            Color::White => white,
            Color::Black => -white,
        })
    }

    /// Model value from White's point of view, clamped to `EVAL_LIMIT`
    pub fn evaluate_white(&self, game: &Game) -> ChessEngineResult<Score> {
        let key = game.key();
        if let Some(value) = self.cache.lock().get(&key).copied() {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }

        let input = BoardTensor::encode(game.position());
        let raw = {
            let mut model = self.gate.lock();
            self.model_calls.fetch_add(1, Ordering::Relaxed);
            model.predict(&input)?
        };

        if !raw.is_finite() {
            return Err(ChessEngineError::evaluator(format!(
                "model returned non-finite value {raw} for {key}"
            )));
        }

        let value = raw.clamp(-EVAL_LIMIT, EVAL_LIMIT);
        self.cache.lock().put(key, value);
        Ok(value)
    }

    /// Number of times the underlying model has been invoked
    pub fn model_calls(&self) -> u64 {
        self.model_calls.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cached_positions(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn model_name(&self) -> String {
        self.gate.lock().name().to_string()
    }
}
