//! Persistence for trained model artifacts.
//!
//! The trainer writes four JSON files into a fixed directory; the service
//! loads the scaler and classifier back at startup. JSON keeps the
//! artifacts portable and diffable, unlike an opaque object dump.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::features::FEATURE_DIM;
use crate::ml::logreg::LogRegModel;
use crate::ml::scaler::StandardScaler;

/// Default artifact directory, relative to the working directory.
pub const MODEL_DIR: &str = "model";

const CLASSIFIER_FILE: &str = "classifier.json";
const SCALER_FILE: &str = "scaler.json";
const TRAIN_FEATURES_FILE: &str = "train_features.json";
const TRAIN_LABELS_FILE: &str = "train_labels.json";

/// Errors raised while saving or loading artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// A required artifact file does not exist.
    #[error("{kind} file not found: {}. Run `heartrisk-train` first.", path.display())]
    Missing {
        kind: &'static str,
        path: PathBuf,
    },
    #[error("io error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("json error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A loaded artifact failed validation.
    #[error("invalid {kind}: {reason}")]
    Invalid { kind: &'static str, reason: String },
}

/// Write the fitted scaler, classifier, scaled training features and
/// training labels into `dir`, creating the directory if absent.
pub fn save_artifacts(
    dir: &Path,
    model: &LogRegModel,
    scaler: &StandardScaler,
    train_features: &[Vec<f32>],
    train_labels: &[u8],
) -> Result<(), ArtifactError> {
    std::fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    write_json(&dir.join(CLASSIFIER_FILE), model)?;
    write_json(&dir.join(SCALER_FILE), scaler)?;
    write_json(&dir.join(TRAIN_FEATURES_FILE), &train_features)?;
    write_json(&dir.join(TRAIN_LABELS_FILE), &train_labels)?;
    Ok(())
}

/// Load and validate the scaler and classifier the service needs.
///
/// Existence is checked up front so a missing artifact fails startup with a
/// message naming the file, instead of surfacing on the first request.
pub fn load_inference_artifacts(
    dir: &Path,
) -> Result<(StandardScaler, LogRegModel), ArtifactError> {
    let classifier_path = dir.join(CLASSIFIER_FILE);
    if !classifier_path.is_file() {
        return Err(ArtifactError::Missing {
            kind: "classifier",
            path: classifier_path,
        });
    }
    let scaler_path = dir.join(SCALER_FILE);
    if !scaler_path.is_file() {
        return Err(ArtifactError::Missing {
            kind: "scaler",
            path: scaler_path,
        });
    }

    let model: LogRegModel = read_json(&classifier_path)?;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        kind: "classifier",
        reason,
    })?;
    if model.feature_dim != FEATURE_DIM {
        return Err(ArtifactError::Invalid {
            kind: "classifier",
            reason: format!(
                "feature_dim {} does not match expected {FEATURE_DIM}",
                model.feature_dim
            ),
        });
    }

    let scaler: StandardScaler = read_json(&scaler_path)?;
    scaler
        .validate(FEATURE_DIM)
        .map_err(|reason| ArtifactError::Invalid {
            kind: "scaler",
            reason,
        })?;

    Ok((scaler, model))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, bytes).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> (LogRegModel, StandardScaler) {
        let model = LogRegModel {
            model_version: 1,
            feature_dim: FEATURE_DIM,
            weights: vec![0.25; FEATURE_DIM],
            bias: -0.5,
        };
        let scaler = StandardScaler {
            mean: vec![1.0; FEATURE_DIM],
            std: vec![2.0; FEATURE_DIM],
        };
        (model, scaler)
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let (model, scaler) = fixture();
        let features = vec![vec![0.5; FEATURE_DIM]];
        let labels = vec![1u8];
        save_artifacts(dir.path(), &model, &scaler, &features, &labels).unwrap();

        let (loaded_scaler, loaded_model) = load_inference_artifacts(dir.path()).unwrap();
        assert_eq!(loaded_model.weights, model.weights);
        assert_eq!(loaded_model.bias, model.bias);
        assert_eq!(loaded_scaler.mean, scaler.mean);
        assert_eq!(loaded_scaler.std, scaler.std);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("model");
        let (model, scaler) = fixture();
        save_artifacts(&nested, &model, &scaler, &[], &[]).unwrap();
        assert!(nested.join("classifier.json").is_file());
        assert!(nested.join("train_labels.json").is_file());
    }

    #[test]
    fn missing_classifier_names_the_file_and_the_trainer() {
        let dir = tempdir().unwrap();
        let err = load_inference_artifacts(dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("classifier.json"));
        assert!(message.contains("heartrisk-train"));
    }

    #[test]
    fn missing_scaler_is_reported_separately() {
        let dir = tempdir().unwrap();
        let (model, _) = fixture();
        std::fs::write(
            dir.path().join("classifier.json"),
            serde_json::to_vec(&model).unwrap(),
        )
        .unwrap();
        let err = load_inference_artifacts(dir.path()).unwrap_err();
        assert!(err.to_string().contains("scaler.json"));
    }

    #[test]
    fn dimension_mismatch_fails_validation() {
        let dir = tempdir().unwrap();
        let (mut model, scaler) = fixture();
        model.feature_dim = 4;
        model.weights = vec![0.0; 4];
        save_artifacts(dir.path(), &model, &scaler, &[], &[]).unwrap();
        let err = load_inference_artifacts(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { kind: "classifier", .. }));
    }
}
