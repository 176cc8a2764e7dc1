use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};

use super::{LogRegModel, sigmoid};

/// Training options for the logistic regression classifier.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 200,
            learning_rate: 0.1,
            l2: 1e-4,
            batch_size: 32,
            seed: 42,
        }
    }
}

/// In-memory binary training dataset: scaled rows plus 0/1 labels.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub x: Vec<Vec<f32>>,
    pub y: Vec<u8>,
}

/// Fit a binary logistic regression with mini-batch gradient descent.
///
/// Initialization and shuffling come from a seeded `StdRng`, so the same
/// dataset and options reproduce bit-identical weights.
pub fn train_logreg(dataset: &TrainDataset, options: &TrainOptions) -> Result<LogRegModel, String> {
    if dataset.x.is_empty() || dataset.y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let dim = dataset.x[0].len();
    if dim == 0 {
        return Err("Zero-width feature rows".to_string());
    }
    for row in &dataset.x {
        if row.len() != dim {
            return Err("Inconsistent feature row length".to_string());
        }
    }
    if dataset.y.iter().any(|&label| label > 1) {
        return Err("Labels must be 0 or 1".to_string());
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights = vec![0.0f32; dim];
    let mut bias = 0.0f32;
    for w in &mut weights {
        *w = (rng.random::<f32>() - 0.5) * 0.01;
    }

    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            let mut grad_w = vec![0.0f32; dim];
            let mut grad_b = 0.0f32;
            for &idx in chunk {
                let x = &dataset.x[idx];
                let target = dataset.y[idx] as f32;
                let mut sum = bias;
                for i in 0..dim {
                    sum += weights[i] * x[i];
                }
                let diff = sigmoid(sum) - target;
                for i in 0..dim {
                    grad_w[i] += diff * x[i];
                }
                grad_b += diff;
            }
            let inv = 1.0 / chunk.len() as f32;
            for i in 0..dim {
                weights[i] -= lr * (grad_w[i] * inv + l2 * weights[i]);
            }
            bias -= lr * grad_b * inv;
        }
    }

    let model = LogRegModel {
        model_version: 1,
        feature_dim: dim,
        weights,
        bias,
    };
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_dataset() -> TrainDataset {
        // Positives cluster around (2, 2), negatives around (-2, -2).
        let mut x = Vec::new();
        let mut y = Vec::new();
        for step in 0..20 {
            let jitter = (step as f32) * 0.01;
            x.push(vec![2.0 + jitter, 2.0 - jitter]);
            y.push(1);
            x.push(vec![-2.0 - jitter, -2.0 + jitter]);
            y.push(0);
        }
        TrainDataset { x, y }
    }

    #[test]
    fn learns_a_separable_problem() {
        let dataset = separable_dataset();
        let model = train_logreg(&dataset, &TrainOptions::default()).unwrap();
        for (row, &label) in dataset.x.iter().zip(dataset.y.iter()) {
            assert_eq!(model.predict(row), Some(label));
        }
    }

    #[test]
    fn same_seed_reproduces_identical_weights() {
        let dataset = separable_dataset();
        let options = TrainOptions::default();
        let first = train_logreg(&dataset, &options).unwrap();
        let second = train_logreg(&dataset, &options).unwrap();
        assert_eq!(first.weights, second.weights);
        assert_eq!(first.bias, second.bias);

        let other = train_logreg(
            &dataset,
            &TrainOptions {
                seed: 7,
                ..options
            },
        )
        .unwrap();
        assert_ne!(first.weights, other.weights);
    }

    #[test]
    fn rejects_degenerate_input() {
        let empty = TrainDataset {
            x: Vec::new(),
            y: Vec::new(),
        };
        assert!(train_logreg(&empty, &TrainOptions::default()).is_err());

        let ragged = TrainDataset {
            x: vec![vec![1.0, 2.0], vec![1.0]],
            y: vec![0, 1],
        };
        assert!(train_logreg(&ragged, &TrainOptions::default()).is_err());

        let bad_label = TrainDataset {
            x: vec![vec![1.0]],
            y: vec![2],
        };
        assert!(train_logreg(&bad_label, &TrainOptions::default()).is_err());
    }
}
