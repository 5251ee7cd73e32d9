//! Prediction Routes

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use data_validator::{RawInputs, ValidationError};
use feature_engine::{DecodedRecord, FeatureVector};
use inference_engine::Diagnosis;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub features: FeatureVector,
    pub diagnosis: Diagnosis,
    pub label: u8,
    pub probability: Option<f64>,
    pub message: &'static str,
    pub latency_us: u64,
}

/// Response for the encode endpoint
#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub features: FeatureVector,
}

/// Response for the decode endpoint
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    pub record: DecodedRecord,
}

/// Validate, encode and classify one set of raw inputs
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<RawInputs>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let features = encode_checked(&state, &inputs)?;

    let result = state.engine.predict(&features)?;
    let diagnosis = result.prediction.diagnosis;

    record_prediction(diagnosis, result.latency_us);
    info!(%request_id, diagnosis = diagnosis.as_str(), "Prediction served");

    Ok(Json(PredictionResponse {
        request_id,
        timestamp: Utc::now(),
        features,
        diagnosis,
        label: diagnosis.label(),
        probability: result.prediction.probability,
        message: diagnosis.message(),
        latency_us: result.latency_us,
    }))
}

/// Encode raw inputs without classifying them
pub async fn encode(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<RawInputs>,
) -> Result<Json<EncodeResponse>, ApiError> {
    let features = encode_checked(&state, &inputs)?;
    Ok(Json(EncodeResponse { features }))
}

/// Render an encoded vector back into category labels
pub async fn decode(
    State(state): State<Arc<AppState>>,
    Json(named): Json<BTreeMap<String, f64>>,
) -> Result<Json<DecodeResponse>, ApiError> {
    let features = FeatureVector::try_from(named)?;
    let record = state.encoder.decode(&features)?;
    Ok(Json(DecodeResponse { record }))
}

/// Reject with every invalid field listed, otherwise encode
fn encode_checked(state: &AppState, inputs: &RawInputs) -> Result<FeatureVector, ApiError> {
    let report = state.validator.check_all(inputs);
    if !report.valid {
        record_rejections(&report.errors);
        warn!("Rejected {} invalid input(s)", report.errors.len());
        return Err(ApiError::Validation(report.errors));
    }
    Ok(state.encoder.encode(inputs)?)
}

fn record_prediction(diagnosis: Diagnosis, latency_us: u64) {
    metrics::counter!("predictions_total", "diagnosis" => diagnosis.as_str()).increment(1);
    metrics::histogram!("prediction_latency_seconds").record(latency_us as f64 / 1e6);
}

fn record_rejections(errors: &[ValidationError]) {
    for e in errors {
        metrics::counter!("validation_failures_total", "field" => e.field().to_string())
            .increment(1);
    }
}
