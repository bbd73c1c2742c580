//! Position evaluation through a learned value model
//!
//! The search sees a single operation, [`EvaluatorAdapter::evaluate`], which
//! returns a score for the side to move. Behind it:
//! - positions are memoized by normalized key in a bounded LRU cache
//! - cache misses are encoded into an 8x8x17 [`BoardTensor`]
//! - the [`ValueModel`] is invoked behind a single process-wide gate
//!
//! ## Module Organization
//!
//! - `adapter` - Caching, call serialization and perspective handling
//! - `tensor` - Fixed-shape model input encoding
//! - `model` - The value model contract
//! - `material` - Deterministic material model
//! - `linear` - Single-layer model loaded from a JSON weight file

mod adapter;
mod linear;
mod material;
mod model;
mod tensor;

pub use adapter::EvaluatorAdapter;
pub use linear::LinearModel;
pub use material::MaterialModel;
pub use model::ValueModel;
pub use tensor::BoardTensor;
