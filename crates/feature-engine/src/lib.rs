//! Feature Encoding Engine
//!
//! Turns validated human-facing inputs into the numeric feature vector the
//! heart disease classifier consumes, and renders vectors back into labels.

mod encoder;
mod features;

pub use data_validator::{RawInputs, RawValue, ValidationError};
pub use encoder::{decode, default_inputs, encode, DecodedRecord, DecodedValue, FeatureEncoder};
pub use features::FeatureVector;
