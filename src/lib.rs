//! Library exports for the heartrisk trainer and inference service.
/// Model artifact persistence.
pub mod artifacts;
/// Environment-driven service configuration.
pub mod config;
/// Training dataset loading and splitting.
pub mod dataset;
/// Clinical feature vector parsing and validation.
pub mod features;
/// Logging setup.
pub mod logging;
/// Machine learning primitives: scaler, classifier, metrics.
pub mod ml;
/// HTTP inference service.
pub mod server;
