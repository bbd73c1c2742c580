//! Single-layer learned evaluator
//!
//! Output is `tanh(w · x + b)` over the flattened board tensor. Weights are
//! read from JSON:
//!
//! ```json
//! { "weights": [/* 1088 floats */], "bias": 0.0 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::ValueModel;
use super::tensor::BoardTensor;
use crate::constants::TENSOR_LEN;
use crate::error::{ChessEngineError, ChessEngineResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearModel {
    /// # Errors
    ///
    /// Returns [`ChessEngineError::EvaluatorUnavailable`] unless there is
    /// exactly one finite weight per tensor element.
    pub fn new(weights: Vec<f32>, bias: f32) -> ChessEngineResult<Self> {
        if weights.len() != TENSOR_LEN {
            return Err(ChessEngineError::evaluator(format!(
                "linear model expects {TENSOR_LEN} weights, got {}",
                weights.len()
            )));
        }
        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ChessEngineError::evaluator(
                "linear model weights must be finite",
            ));
        }
        Ok(Self { weights, bias })
    }

    pub fn from_json_str(json: &str) -> ChessEngineResult<Self> {
        let raw: LinearModel = serde_json::from_str(json)
            .map_err(|e| ChessEngineError::evaluator(format!("malformed weight file: {e}")))?;
        Self::new(raw.weights, raw.bias)
    }

    /// Load weights from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ChessEngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ChessEngineError::evaluator(format!("cannot read {}: {e}", path.display()))
        })?;
        let model = Self::from_json_str(&json)?;
        tracing::info!("[EVAL] Loaded linear model from {}", path.display());
        Ok(model)
    }
}

impl ValueModel for LinearModel {
    fn predict(&mut self, input: &BoardTensor) -> ChessEngineResult<f32> {
        let activation: f32 = self
            .weights
            .iter()
            .zip(input.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;
        Ok(activation.tanh())
    }

    fn name(&self) -> &str {
        "linear"
    }
}
