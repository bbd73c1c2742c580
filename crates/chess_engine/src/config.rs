//! Engine configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EVAL_CACHE_CAPACITY, DEFAULT_MAX_QUIESCENCE_PLY, DEFAULT_TIME_BUDGET_MS,
    DEFAULT_TT_CAPACITY,
};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::search::SearchLimits;

/// Which value model backs the evaluator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    #[default]
    Material,
    Linear { weights_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Transposition table entries
    pub tt_capacity: usize,
    /// Cached evaluator results
    pub eval_cache_capacity: usize,
    pub max_quiescence_ply: u32,
    pub default_time_budget_ms: u64,
    /// Depth ceiling for every search; `None` deepens until time runs out
    pub max_depth: Option<u32>,
    pub model: ModelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_capacity: DEFAULT_TT_CAPACITY,
            eval_cache_capacity: DEFAULT_EVAL_CACHE_CAPACITY,
            max_quiescence_ply: DEFAULT_MAX_QUIESCENCE_PLY,
            default_time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_depth: None,
            model: ModelConfig::default(),
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns [`ChessEngineError::Config`] for malformed JSON or invalid values.
    pub fn from_json_str(text: &str) -> ChessEngineResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ChessEngineError::config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ChessEngineError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> ChessEngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ChessEngineError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!("[CONFIG] Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ChessEngineError::Config`] for zero capacities or a zero depth ceiling.
    pub fn validate(&self) -> ChessEngineResult<()> {
        if self.tt_capacity == 0 {
            return Err(ChessEngineError::config("tt_capacity must be > 0"));
        }
        if self.eval_cache_capacity == 0 {
            return Err(ChessEngineError::config("eval_cache_capacity must be > 0"));
        }
        if self.max_depth == Some(0) {
            return Err(ChessEngineError::config("max_depth must be > 0 when set"));
        }
        Ok(())
    }

    pub fn default_time_budget(&self) -> Duration {
        Duration::from_millis(self.default_time_budget_ms)
    }

    /// Limits for one search with the given budget and the configured ceiling
    pub fn limits(&self, time_budget: Duration) -> SearchLimits {
        SearchLimits {
            time_budget,
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.eval_cache_capacity, 20_000);
        assert_eq!(config.default_time_budget(), Duration::from_millis(1000));
        assert_eq!(config.model, ModelConfig::Material);
    }

    #[test]
    fn test_linear_model_config_parses() {
        let config = EngineConfig::from_json_str(
            r#"{"max_depth": 4, "model": {"kind": "linear", "weights_path": "model.json"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.model,
            ModelConfig::Linear {
                weights_path: PathBuf::from("model.json")
            }
        );
        assert_eq!(config.limits(Duration::from_millis(50)).max_depth, Some(4));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = EngineConfig::from_json_str(r#"{"tt_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, ChessEngineError::Config { .. }));

        let err = EngineConfig::from_json_str(r#"{"eval_cache_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, ChessEngineError::Config { .. }));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().contains("malformed config"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = EngineConfig::load("/nonexistent/engine.json").unwrap_err();
        assert!(matches!(err, ChessEngineError::Config { .. }));
    }
}
