//! Binary logistic regression over scaled clinical feature vectors.

use serde::{Deserialize, Serialize};

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

/// Decision threshold for the positive (disease) class.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Versioned binary logistic regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRegModel {
    /// Model format version.
    pub model_version: i64,
    /// Expected feature vector length.
    pub feature_dim: usize,
    /// Per-feature weights.
    pub weights: Vec<f32>,
    /// Intercept term.
    pub bias: f32,
}

impl LogRegModel {
    /// Validate the model dimensions and parameter finiteness.
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_dim == 0 {
            return Err("feature_dim must be > 0".to_string());
        }
        if self.weights.len() != self.feature_dim {
            return Err(format!(
                "weights length {} does not match feature_dim {}",
                self.weights.len(),
                self.feature_dim
            ));
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.bias.is_finite() {
            return Err("Model parameters must be finite".to_string());
        }
        Ok(())
    }

    /// Probability of the positive class for one scaled row.
    ///
    /// Returns `None` on dimension mismatch.
    pub fn predict_proba(&self, row: &[f32]) -> Option<f32> {
        if row.len() != self.feature_dim {
            return None;
        }
        let mut sum = self.bias;
        for (weight, value) in self.weights.iter().zip(row.iter()) {
            sum += weight * value;
        }
        Some(sigmoid(sum))
    }

    /// Binary label for one scaled row: 1 iff the positive-class
    /// probability reaches [`DECISION_THRESHOLD`].
    pub fn predict(&self, row: &[f32]) -> Option<u8> {
        self.predict_proba(row)
            .map(|p| u8::from(p >= DECISION_THRESHOLD))
    }
}

/// Numerically plain logistic sigmoid.
pub fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}
