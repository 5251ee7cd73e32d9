//! Data Validation
//!
//! Raw human-facing input values and their validation against the attribute
//! catalogue's declared domains.

mod error;
mod raw;
mod validator;

pub use error::ValidationError;
pub use raw::{RawInputs, RawValue};
pub use validator::{Checked, ValidationResult, Validator};
