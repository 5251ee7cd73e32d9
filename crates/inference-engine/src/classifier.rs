//! Classifier Contract

use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};

/// Outcome predicted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    /// Label 0
    NoHeartDisease,
    /// Label 1
    HeartDisease,
}

impl Diagnosis {
    /// Map a binary label; anything non-zero is treated as presence
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Diagnosis::NoHeartDisease
        } else {
            Diagnosis::HeartDisease
        }
    }

    /// Binary label
    pub fn label(&self) -> u8 {
        match self {
            Diagnosis::NoHeartDisease => 0,
            Diagnosis::HeartDisease => 1,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::NoHeartDisease => "no_heart_disease",
            Diagnosis::HeartDisease => "heart_disease",
        }
    }

    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Diagnosis::NoHeartDisease => {
                "The model predicts that the patient DOES NOT have heart disease."
            }
            Diagnosis::HeartDisease => {
                "Warning: The model predicts that the patient has heart disease."
            }
        }
    }
}

/// Prediction for one feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted outcome
    pub diagnosis: Diagnosis,
    /// Probability of heart disease, when the model exposes one
    pub probability: Option<f64>,
}

/// An opaque, pre-trained binary classifier
pub trait Classifier: Send + Sync {
    /// Short name of the model family
    fn kind(&self) -> &'static str;

    /// Input column names, in the order the model was trained on
    fn feature_names(&self) -> Vec<String>;

    /// Predict one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError>;
}
