//! Standard scaler: per-feature zero-mean/unit-variance normalization.

use serde::{Deserialize, Serialize};

/// Per-feature normalization parameters learned from the training split.
///
/// Immutable after fitting; the same transform is applied to every
/// inference request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature means.
    pub mean: Vec<f32>,
    /// Per-feature population standard deviations.
    pub std: Vec<f32>,
}

impl StandardScaler {
    /// Fit means and standard deviations over the given rows.
    ///
    /// Zero-variance columns keep a divisor of `1.0` so constant features
    /// map to `0.0` instead of producing NaN.
    pub fn fit(rows: &[Vec<f32>]) -> Result<Self, String> {
        let Some(first) = rows.first() else {
            return Err("Cannot fit scaler on an empty training set".to_string());
        };
        let dim = first.len();
        if dim == 0 {
            return Err("Cannot fit scaler on zero-width rows".to_string());
        }
        for row in rows {
            if row.len() != dim {
                return Err("Inconsistent feature row length".to_string());
            }
        }

        let count = rows.len() as f32;
        let mut mean = vec![0.0f32; dim];
        for row in rows {
            for (acc, &value) in mean.iter_mut().zip(row.iter()) {
                *acc += value;
            }
        }
        for acc in &mut mean {
            *acc /= count;
        }

        let mut std = vec![0.0f32; dim];
        for row in rows {
            for i in 0..dim {
                let diff = row[i] - mean[i];
                std[i] += diff * diff;
            }
        }
        for acc in &mut std {
            *acc = (*acc / count).sqrt();
            if *acc == 0.0 {
                *acc = 1.0;
            }
        }

        Ok(Self { mean, std })
    }

    /// Number of features the scaler was fitted on.
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Normalize a single row. Returns `None` on dimension mismatch.
    pub fn transform(&self, row: &[f32]) -> Option<Vec<f32>> {
        if row.len() != self.dim() {
            return None;
        }
        Some(
            row.iter()
                .zip(self.mean.iter().zip(self.std.iter()))
                .map(|(&value, (&mean, &std))| (value - mean) / std)
                .collect(),
        )
    }

    /// Normalize a batch of rows. Returns `None` if any row mismatches.
    pub fn transform_rows(&self, rows: &[Vec<f32>]) -> Option<Vec<Vec<f32>>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }

    /// Validate dimensions and parameter finiteness.
    pub fn validate(&self, expected_dim: usize) -> Result<(), String> {
        if self.mean.len() != expected_dim || self.std.len() != expected_dim {
            return Err(format!(
                "Scaler dimension {}/{} does not match expected {}",
                self.mean.len(),
                self.std.len(),
                expected_dim
            ));
        }
        if self.mean.iter().any(|v| !v.is_finite()) {
            return Err("Scaler means must be finite".to_string());
        }
        if self.std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err("Scaler deviations must be finite and positive".to_string());
        }
        Ok(())
    }
}
