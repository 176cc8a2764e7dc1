//! Machine learning helpers for training and inference.
//!
//! These building blocks are deliberately dependency-light: a standard
//! scaler, a binary logistic regression with a reproducible trainer, and
//! the evaluation metrics the trainer reports.

pub mod logreg;
pub mod metrics;
pub mod scaler;
