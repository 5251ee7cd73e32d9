//! Schema and Information Routes

use axum::Json;
use feature_schema::{catalogue, FeatureDefinition, FEATURE_COUNT};
use serde::Serialize;

/// Response for the schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub feature_count: usize,
    pub features: &'static [FeatureDefinition],
}

/// Static page text
#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

const ABOUT_PARAGRAPHS: &[&str] = &[
    "Heart disease refers to various conditions that affect the heart's ability to function properly.",
    "The most common type is coronary artery disease (CAD), which can lead to heart attacks. Other types include heart failure, arrhythmias, and heart valve problems.",
    "This app predicts the likelihood of having heart disease based on input features such as age, sex, blood pressure, cholesterol levels, and other health indicators.",
    "Once heart disease is detected, further test will be carried out by healthcare professionals to determine the specific type of heart disease and the appropriate treatment.",
];

/// Every attribute with its prompt, domain and initial value, in input order
pub async fn get_schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        feature_count: FEATURE_COUNT,
        features: catalogue(),
    })
}

/// "What is heart disease" page
pub async fn get_about() -> Json<AboutResponse> {
    Json(AboutResponse {
        title: "What is heart disease",
        paragraphs: ABOUT_PARAGRAPHS,
    })
}
