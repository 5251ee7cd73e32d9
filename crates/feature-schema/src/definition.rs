//! Feature Definition Types

use serde::Serialize;

/// Semantic type of a clinical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    /// Whole-number measurement passed through unchanged
    ContinuousInteger,
    /// Real-valued measurement passed through unchanged
    ContinuousReal,
    /// Raw measurement reduced to 0/1 by a threshold
    BooleanDerived,
    /// One label out of an ordered list
    Categorical,
}

impl FeatureKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::ContinuousInteger => "continuous-integer",
            FeatureKind::ContinuousReal => "continuous-real",
            FeatureKind::BooleanDerived => "boolean-derived",
            FeatureKind::Categorical => "categorical",
        }
    }
}

/// Valid input domain of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Domain {
    /// Inclusive integer range
    IntegerRange { min: i64, max: i64, step: i64 },
    /// Inclusive real range
    RealRange { min: f64, max: f64, step: f64 },
    /// Inclusive integer range of a raw reading; encodes to 1 when the
    /// reading is strictly greater than `threshold`
    Threshold {
        min: i64,
        max: i64,
        step: i64,
        threshold: i64,
    },
    /// Ordered labels; a label's position is its encoded value
    Labels { labels: &'static [&'static str] },
}

/// Value the input form shows before the user touches it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InitialValue {
    Integer(i64),
    Real(f64),
    Label(&'static str),
}

/// Static description of one clinical attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDefinition {
    /// Stable identifier, also the classifier's column name
    pub name: &'static str,
    /// Prompt shown next to the input widget
    pub label: &'static str,
    /// Semantic type
    pub kind: FeatureKind,
    /// Valid input domain
    pub domain: Domain,
    /// Initial form value
    pub initial: InitialValue,
}

impl FeatureDefinition {
    /// Whether the attribute is a label list
    pub fn is_categorical(&self) -> bool {
        matches!(self.domain, Domain::Labels { .. })
    }

    /// Category labels, in encoding order
    pub fn labels(&self) -> Option<&'static [&'static str]> {
        match self.domain {
            Domain::Labels { labels } => Some(labels),
            _ => None,
        }
    }

    /// Encoded position of a category label
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.labels()?.iter().position(|l| *l == label)
    }

    /// Category label at an encoded position
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        self.labels()?.get(index).copied()
    }

    /// Inclusive numeric bounds for range-typed attributes
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.domain {
            Domain::IntegerRange { min, max, .. } | Domain::Threshold { min, max, .. } => {
                Some((min as f64, max as f64))
            }
            Domain::RealRange { min, max, .. } => Some((min, max)),
            Domain::Labels { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: FeatureDefinition = FeatureDefinition {
        name: "exang",
        label: "Exercise induced angina",
        kind: FeatureKind::Categorical,
        domain: Domain::Labels {
            labels: &["No", "Yes"],
        },
        initial: InitialValue::Label("No"),
    };

    #[test]
    fn test_label_lookup() {
        assert_eq!(SAMPLE.position_of("Yes"), Some(1));
        assert_eq!(SAMPLE.position_of("yes"), None);
        assert_eq!(SAMPLE.label_at(0), Some("No"));
        assert_eq!(SAMPLE.label_at(2), None);
        assert!(SAMPLE.bounds().is_none());
    }

    #[test]
    fn test_domain_serialization() {
        let json = serde_json::to_value(SAMPLE.domain).unwrap();
        assert_eq!(json["type"], "labels");
        assert_eq!(json["labels"][1], "Yes");
        assert_eq!(serde_json::to_value(SAMPLE.kind).unwrap(), "categorical");
    }
}
