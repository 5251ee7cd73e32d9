//! The Clinical Attribute Catalogue
//!
//! Entries are ordered exactly as the classifier was trained. Reordering them
//! silently corrupts every prediction.

use crate::definition::{Domain, FeatureDefinition, FeatureKind, InitialValue};

/// Number of attributes in a feature vector
pub const FEATURE_COUNT: usize = 13;

/// Patient sex
pub const SEX_LABELS: &[&str] = &["Female", "Male"];
/// Chest pain type
pub const CP_LABELS: &[&str] = &[
    "Typical Angina",
    "Atypical Angina",
    "Non-anginal Pain",
    "Asymptomatic",
];
/// Resting electrocardiographic results
pub const RESTECG_LABELS: &[&str] = &[
    "Normal",
    "ST-T Wave Abnormality",
    "Left Ventricular Hypertrophy",
];
/// Exercise induced angina
pub const EXANG_LABELS: &[&str] = &["No", "Yes"];
/// Slope of the peak exercise ST segment
pub const SLOPE_LABELS: &[&str] = &["Upsloping", "Flat", "Downsloping"];
/// Thalassemia
pub const THAL_LABELS: &[&str] = &["Normal", "Fixed Defect", "Reversible Defect"];

/// All attribute definitions, in classifier input order
pub static CATALOGUE: [FeatureDefinition; FEATURE_COUNT] = [
    FeatureDefinition {
        name: "age",
        label: "Patient's Age",
        kind: FeatureKind::ContinuousInteger,
        domain: Domain::IntegerRange {
            min: 29,
            max: 77,
            step: 1,
        },
        initial: InitialValue::Integer(30),
    },
    FeatureDefinition {
        name: "sex",
        label: "Patient's sex",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels { labels: SEX_LABELS },
        initial: InitialValue::Label("Female"),
    },
    FeatureDefinition {
        name: "cp",
        label: "Chest Pain Type",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels { labels: CP_LABELS },
        initial: InitialValue::Label("Typical Angina"),
    },
    FeatureDefinition {
        name: "trestbps",
        label: "Patient's Resting Blood Pressure (mm Hg) on admission into the hospital",
        kind: FeatureKind::ContinuousReal,
        domain: Domain::RealRange {
            min: 94.0,
            max: 200.0,
            step: 0.01,
        },
        initial: InitialValue::Real(100.0),
    },
    FeatureDefinition {
        name: "chol",
        label: "Patient's Serum Cholestoral level in (mg/dl)",
        kind: FeatureKind::ContinuousInteger,
        domain: Domain::IntegerRange {
            min: 126,
            max: 409,
            step: 1,
        },
        initial: InitialValue::Integer(200),
    },
    // The reading is a raw measurement, but the classifier was trained on the
    // "> 120 mg/dl" indicator. Keep the threshold literal.
    FeatureDefinition {
        name: "fbs",
        label: "Patient's Fasting Blood Sugar in mg/dl",
        kind: FeatureKind::BooleanDerived,
        domain: Domain::Threshold {
            min: 100,
            max: 200,
            step: 1,
            threshold: 120,
        },
        initial: InitialValue::Integer(150),
    },
    FeatureDefinition {
        name: "restecg",
        label: "Patient's Resting Electrocardiographic Results",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels {
            labels: RESTECG_LABELS,
        },
        initial: InitialValue::Label("Normal"),
    },
    FeatureDefinition {
        name: "thalach",
        label: "Maximum Heart Rate Achieved by patient",
        kind: FeatureKind::ContinuousInteger,
        domain: Domain::IntegerRange {
            min: 80,
            max: 300,
            step: 1,
        },
        initial: InitialValue::Integer(90),
    },
    FeatureDefinition {
        name: "exang",
        label: "Does the patient have Exercise Induced Angina",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels {
            labels: EXANG_LABELS,
        },
        initial: InitialValue::Label("No"),
    },
    FeatureDefinition {
        name: "oldpeak",
        label: "ST Depression Induced by Exercise Relative to Rest",
        kind: FeatureKind::ContinuousReal,
        domain: Domain::RealRange {
            min: 0.0,
            max: 6.0,
            step: 0.1,
        },
        initial: InitialValue::Real(2.0),
    },
    FeatureDefinition {
        name: "slope",
        label: "Slope of the Peak Exercise ST Segment",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels {
            labels: SLOPE_LABELS,
        },
        initial: InitialValue::Label("Upsloping"),
    },
    FeatureDefinition {
        name: "ca",
        label: "Number of Major Vessels Colored by Flourosopy",
        kind: FeatureKind::ContinuousInteger,
        domain: Domain::IntegerRange {
            min: 0,
            max: 5,
            step: 1,
        },
        initial: InitialValue::Integer(3),
    },
    FeatureDefinition {
        name: "thal",
        label: "Thalassemia",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels {
            labels: THAL_LABELS,
        },
        initial: InitialValue::Label("Normal"),
    },
];

/// The ordered catalogue
pub fn catalogue() -> &'static [FeatureDefinition] {
    &CATALOGUE
}

/// Look up a definition by attribute name
pub fn definition(name: &str) -> Option<&'static FeatureDefinition> {
    CATALOGUE.iter().find(|d| d.name == name)
}

/// Position of an attribute in the feature vector
pub fn position(name: &str) -> Option<usize> {
    CATALOGUE.iter().position(|d| d.name == name)
}

/// Attribute names in classifier input order
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    CATALOGUE.iter().map(|d| d.name)
}
