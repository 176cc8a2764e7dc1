//! Evaluation metrics for the binary classifier.

/// Confusion counts for a binary classifier.
#[derive(Debug, Clone, Default)]
pub struct BinaryConfusion {
    /// Label 1 predicted as 1.
    pub true_positive: u32,
    /// Label 0 predicted as 1.
    pub false_positive: u32,
    /// Label 0 predicted as 0.
    pub true_negative: u32,
    /// Label 1 predicted as 0.
    pub false_negative: u32,
}

impl BinaryConfusion {
    /// Record one prediction against the true label.
    pub fn add(&mut self, truth: u8, predicted: u8) {
        match (truth, predicted) {
            (1, 1) => self.true_positive = self.true_positive.saturating_add(1),
            (0, 1) => self.false_positive = self.false_positive.saturating_add(1),
            (0, 0) => self.true_negative = self.true_negative.saturating_add(1),
            (1, 0) => self.false_negative = self.false_negative.saturating_add(1),
            _ => {}
        }
    }

    /// Total recorded predictions.
    pub fn total(&self) -> u32 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Fraction of correct predictions; 0 when empty.
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positive + self.true_negative) as f32 / total as f32
    }

    /// `TP / (TP + FP)`; 0 when no positive predictions were made.
    pub fn precision(&self) -> f32 {
        let denom = self.true_positive + self.false_positive;
        if denom == 0 {
            return 0.0;
        }
        self.true_positive as f32 / denom as f32
    }

    /// `TP / (TP + FN)`; 0 when no positive labels exist.
    pub fn recall(&self) -> f32 {
        let denom = self.true_positive + self.false_negative;
        if denom == 0 {
            return 0.0;
        }
        self.true_positive as f32 / denom as f32
    }

    /// Number of true examples carrying the given label.
    pub fn support(&self, label: u8) -> u32 {
        match label {
            1 => self.true_positive + self.false_negative,
            _ => self.true_negative + self.false_positive,
        }
    }
}
