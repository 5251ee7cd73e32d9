//! Feature Schema
//!
//! The single declared catalogue of clinical attributes. Encoding, decoding,
//! validation and the classifier's input check all read from it.

mod catalogue;
mod definition;

pub use catalogue::{
    catalogue, definition, feature_names, position, CATALOGUE, CP_LABELS, EXANG_LABELS,
    FEATURE_COUNT, RESTECG_LABELS, SEX_LABELS, SLOPE_LABELS, THAL_LABELS,
};
pub use definition::{Domain, FeatureDefinition, FeatureKind, InitialValue};
