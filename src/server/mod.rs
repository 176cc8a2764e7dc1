//! HTTP inference service.
//!
//! One page and one operation: `GET /` serves the input form, and
//! `POST /predict` validates the 13 clinical fields, applies the stored
//! scaler and classifier, and answers with a JSON verdict. The loaded
//! artifacts are read-only after startup, so request handlers share them
//! without locking.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FeatureVector, parse_form};
use crate::ml::logreg::LogRegModel;
use crate::ml::scaler::StandardScaler;

/// Verdict message for a positive prediction.
pub const DETECTED_MESSAGE: &str = "Heart Disease Detected";
/// Verdict message for a negative prediction.
pub const NOT_DETECTED_MESSAGE: &str = "No Heart Disease Detected";

/// Read-only state shared across request handlers.
#[derive(Debug)]
pub struct AppState {
    /// Fitted feature scaler.
    pub scaler: StandardScaler,
    /// Fitted classifier.
    pub model: LogRegModel,
}

/// Shared handle to the loaded artifacts.
pub type SharedState = Arc<AppState>;

/// Successful prediction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Binary label: 1 means disease detected.
    pub prediction: u8,
    /// Positive-class probability as a percentage, rounded to 2 decimals.
    pub probability: f32,
    /// Human-readable verdict keyed by the label.
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Failures inside the scaling/prediction pipeline. These indicate a
/// broken artifact pairing and map to HTTP 500.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("scaler rejected feature vector of length {0}")]
    ScalerDim(usize),
    #[error("classifier rejected scaled vector of length {0}")]
    ClassifierDim(usize),
}

/// Build the service router around the loaded artifacts.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

async fn predict(
    State(state): State<SharedState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let features = match parse_form(&fields) {
        Ok(features) => features,
        Err(err) => {
            tracing::debug!("rejected prediction request: {err}");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match run_prediction(&state, &features) {
        Ok(result) => {
            tracing::debug!(
                prediction = result.prediction,
                probability = result.probability,
                "served prediction"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => {
            tracing::error!("prediction failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Scale the vector, classify it, and shape the response payload.
pub fn run_prediction(
    state: &AppState,
    features: &FeatureVector,
) -> Result<PredictResponse, PredictError> {
    let row = features.as_slice();
    let scaled = state
        .scaler
        .transform(row)
        .ok_or(PredictError::ScalerDim(row.len()))?;
    let probability = state
        .model
        .predict_proba(&scaled)
        .ok_or(PredictError::ClassifierDim(scaled.len()))?;
    let prediction = u8::from(probability >= crate::ml::logreg::DECISION_THRESHOLD);

    let percent = round2(probability * 100.0).clamp(0.0, 100.0);
    let message = if prediction == 1 {
        DETECTED_MESSAGE
    } else {
        NOT_DETECTED_MESSAGE
    };
    Ok(PredictResponse {
        prediction,
        probability: percent,
        message: message.to_string(),
    })
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
