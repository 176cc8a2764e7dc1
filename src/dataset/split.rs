//! Deterministic train/test splitting.

use rand::rngs::StdRng;
use rand::{SeedableRng, seq::SliceRandom};

use super::loader::LabeledDataset;

/// One side of a train/test split.
#[derive(Debug, Clone)]
pub struct Split {
    pub x: Vec<Vec<f32>>,
    pub y: Vec<u8>,
}

/// Shuffle with a seeded RNG and split off the trailing `test_fraction`.
///
/// Both sides keep at least one sample. The same seed always produces the
/// same partition.
pub fn train_test_split(
    dataset: &LabeledDataset,
    test_fraction: f32,
    seed: u64,
) -> Result<(Split, Split), String> {
    let n = dataset.x.len();
    if n != dataset.y.len() {
        return Err("Mismatched feature/label lengths".to_string());
    }
    if n < 2 {
        return Err("Need at least two samples to split".to_string());
    }
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(format!("Invalid test fraction: {test_fraction}"));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_count = ((n as f32 * test_fraction).round() as usize).clamp(1, n - 1);
    let (test_idx, train_idx) = indices.split_at(test_count);

    Ok((gather(dataset, train_idx), gather(dataset, test_idx)))
}

fn gather(dataset: &LabeledDataset, indices: &[usize]) -> Split {
    let mut x = Vec::with_capacity(indices.len());
    let mut y = Vec::with_capacity(indices.len());
    for &idx in indices {
        x.push(dataset.x[idx].clone());
        y.push(dataset.y[idx]);
    }
    Split { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> LabeledDataset {
        LabeledDataset {
            x: (0..n).map(|i| vec![i as f32]).collect(),
            y: (0..n).map(|i| (i % 2) as u8).collect(),
        }
    }

    #[test]
    fn split_sizes_follow_fraction() {
        let (train, test) = train_test_split(&dataset(10), 0.2, 42).unwrap();
        assert_eq!(train.x.len(), 8);
        assert_eq!(test.x.len(), 2);
        assert_eq!(train.x.len(), train.y.len());
    }

    #[test]
    fn same_seed_is_deterministic() {
        let data = dataset(25);
        let (train_a, test_a) = train_test_split(&data, 0.2, 42).unwrap();
        let (train_b, test_b) = train_test_split(&data, 0.2, 42).unwrap();
        assert_eq!(train_a.x, train_b.x);
        assert_eq!(test_a.x, test_b.x);

        let (train_c, _) = train_test_split(&data, 0.2, 7).unwrap();
        assert_ne!(train_a.x, train_c.x);
    }

    #[test]
    fn split_is_a_partition() {
        let data = dataset(11);
        let (train, test) = train_test_split(&data, 0.3, 1).unwrap();
        let mut seen: Vec<f32> = train
            .x
            .iter()
            .chain(test.x.iter())
            .map(|row| row[0])
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f32> = (0..11).map(|i| i as f32).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(train_test_split(&dataset(1), 0.2, 42).is_err());
        assert!(train_test_split(&dataset(10), 0.0, 42).is_err());
        assert!(train_test_split(&dataset(10), 1.0, 42).is_err());
    }
}
