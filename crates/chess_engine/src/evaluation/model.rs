//! Value model contract

use super::tensor::BoardTensor;
use crate::error::ChessEngineResult;

/// A learned position evaluator
///
/// Implementations return the value of the encoded position from White's
/// point of view, in `[-1, 1]`, and must be deterministic for a given input.
/// The adapter never calls a model concurrently, so `predict` takes `&mut self`.
pub trait ValueModel: Send {
    /// # Errors
    ///
    /// Returns [`crate::ChessEngineError::EvaluatorUnavailable`] if inference fails.
    fn predict(&mut self, input: &BoardTensor) -> ChessEngineResult<f32>;

    fn name(&self) -> &str;
}

impl<M: ValueModel + ?Sized> ValueModel for Box<M> {
    fn predict(&mut self, input: &BoardTensor) -> ChessEngineResult<f32> {
        (**self).predict(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
