//! Material evaluation
//!
//! A deterministic stand-in for a trained network: counts the piece planes
//! of the input tensor and squashes the balance into `(-1, 1)`.

use super::model::ValueModel;
use super::tensor::BoardTensor;
use crate::constants::{MATERIAL_SCALE, PIECE_VALUES};
use crate::error::ChessEngineResult;

#[derive(Debug, Clone, Copy)]
pub struct MaterialModel {
    scale: f32,
}

impl Default for MaterialModel {
    fn default() -> Self {
        Self {
            scale: MATERIAL_SCALE,
        }
    }
}

impl MaterialModel {
    /// White material minus black material, in pawns
    pub fn material_balance(input: &BoardTensor) -> f32 {
        PIECE_VALUES
            .iter()
            .enumerate()
            .map(|(plane, value)| value * (input.plane_sum(plane) - input.plane_sum(plane + 6)))
            .sum()
    }
}

impl ValueModel for MaterialModel {
    fn predict(&mut self, input: &BoardTensor) -> ChessEngineResult<f32> {
        Ok((Self::material_balance(input) / self.scale).tanh())
    }

    fn name(&self) -> &str {
        "material"
    }
}
