//! Classifier Inference Engine
//!
//! Loads the pre-trained heart disease classifier once and runs it on
//! encoded feature vectors.

mod classifier;
mod engine;
mod logistic;
#[cfg(feature = "onnx")]
mod onnx;

pub use classifier::{Classifier, Diagnosis, Prediction};
pub use engine::{InferenceEngine, InferenceResult, ModelFormat, ModelInfo};
pub use logistic::LogisticRegression;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Feature schema mismatch: expected [{expected}], got [{actual}]")]
    SchemaMismatch { expected: String, actual: String },
}
