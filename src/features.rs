//! Clinical feature vector parsing and validation.
//!
//! The classifier consumes a fixed-order vector of 13 measurements. All
//! fields are integer-valued except `oldpeak`, which is a decimal. Values
//! arrive as form-encoded strings and are validated in two passes: presence
//! first, then numeric coercion.

use std::collections::HashMap;

use thiserror::Error;

/// Number of clinical measurements per sample.
pub const FEATURE_DIM: usize = 13;

/// Required feature names in classifier input order.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// The only decimal-valued field; every other field must parse as an integer.
const DECIMAL_FIELD: &str = "oldpeak";

/// Validation errors for incoming form fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureError {
    /// One or more required fields were absent or empty.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// A field was present but not parseable as its expected numeric type.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Offending field name.
        field: String,
        /// Raw submitted value.
        value: String,
    },
}

/// Ordered vector of the 13 clinical measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_DIM]);

impl FeatureVector {
    /// Wrap an already-ordered row of values.
    pub fn from_values(values: [f32; FEATURE_DIM]) -> Self {
        Self(values)
    }

    /// Borrow the values in classifier input order.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Parse and validate form fields into a feature vector.
///
/// Missing and empty fields are collected first so the caller can report
/// every omitted name at once; coercion failures report the first offending
/// field with its raw value.
pub fn parse_form(fields: &HashMap<String, String>) -> Result<FeatureVector, FeatureError> {
    let missing: Vec<String> = FEATURE_NAMES
        .iter()
        .filter(|name| {
            fields
                .get(**name)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FeatureError::MissingFields(missing));
    }

    let mut values = [0.0f32; FEATURE_DIM];
    for (idx, name) in FEATURE_NAMES.iter().enumerate() {
        let raw = fields[*name].trim();
        values[idx] = parse_field(name, raw)?;
    }
    Ok(FeatureVector(values))
}

fn parse_field(field: &str, raw: &str) -> Result<f32, FeatureError> {
    let invalid = || FeatureError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    };
    if field == DECIMAL_FIELD {
        let value = raw.parse::<f32>().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(value)
    } else {
        let value = raw.parse::<i64>().map_err(|_| invalid())?;
        Ok(value as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> HashMap<String, String> {
        let values = [
            ("age", "63"),
            ("sex", "1"),
            ("cp", "3"),
            ("trestbps", "145"),
            ("chol", "233"),
            ("fbs", "1"),
            ("restecg", "0"),
            ("thalach", "150"),
            ("exang", "0"),
            ("oldpeak", "2.3"),
            ("slope", "0"),
            ("ca", "0"),
            ("thal", "1"),
        ];
        values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn parses_complete_form() {
        let vector = parse_form(&full_form()).unwrap();
        let values = vector.as_slice();
        assert_eq!(values.len(), FEATURE_DIM);
        assert_eq!(values[0], 63.0);
        assert_eq!(values[9], 2.3);
        assert_eq!(values[12], 1.0);
    }

    #[test]
    fn missing_fields_are_listed_in_feature_order() {
        let mut form = full_form();
        form.remove("age");
        form.remove("oldpeak");
        let err = parse_form(&form).unwrap_err();
        assert_eq!(
            err,
            FeatureError::MissingFields(vec!["age".to_string(), "oldpeak".to_string()])
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: age, oldpeak"
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut form = full_form();
        form.insert("chol".to_string(), "  ".to_string());
        let err = parse_form(&form).unwrap_err();
        assert_eq!(err, FeatureError::MissingFields(vec!["chol".to_string()]));
    }

    #[test]
    fn non_numeric_integer_field_is_rejected() {
        let mut form = full_form();
        form.insert("age".to_string(), "abc".to_string());
        let err = parse_form(&form).unwrap_err();
        assert_eq!(
            err,
            FeatureError::InvalidValue {
                field: "age".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn decimal_value_in_integer_field_is_rejected() {
        let mut form = full_form();
        form.insert("ca".to_string(), "2.5".to_string());
        let err = parse_form(&form).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidValue { field, .. } if field == "ca"));
    }

    #[test]
    fn oldpeak_accepts_decimal_and_rejects_garbage() {
        let mut form = full_form();
        form.insert("oldpeak".to_string(), "1.4".to_string());
        assert!(parse_form(&form).is_ok());

        form.insert("oldpeak".to_string(), "high".to_string());
        let err = parse_form(&form).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidValue { field, .. } if field == "oldpeak"));
    }
}
