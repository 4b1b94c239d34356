//! Schema Validator — checks an extracted AI result against the expected
//! rewrite schema before anything is persisted.
//!
//! Required keys: `summary` (string), `tailoredExperiences` (array of
//! experience-shaped objects), `highlightedSkills` (array of strings).
//! `suggestedAdditions` is optional but must be an array of strings when
//! present. Missing keys are reported all at once, not first-failure-only.

use serde_json::Value;
use thiserror::Error;

use crate::models::resume::GeneratedResume;

const REQUIRED_KEYS: &[&str] = &["summary", "tailoredExperiences", "highlightedSkills"];

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("AI result is missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("AI result key '{key}' has the wrong shape: expected {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: String,
    },
}

/// Validates an extracted AI result and returns the typed structure.
///
/// Valid values are passed through unchanged — no coercion. Fields absent
/// from individual experience entries default to empty strings, consistent
/// with the payload defaulting rules.
pub fn validate_ai_result(value: Value) -> Result<GeneratedResume, ValidateError> {
    let object = match value.as_object() {
        Some(map) => map,
        None => {
            return Err(ValidateError::WrongType {
                key: "$".to_string(),
                expected: "object",
                actual: json_type_name(&value).to_string(),
            })
        }
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidateError::MissingKeys(missing));
    }

    expect_string(object, "summary")?;
    expect_array_of_objects(object, "tailoredExperiences")?;
    expect_array_of_strings(object, "highlightedSkills")?;
    if object.contains_key("suggestedAdditions") && !object["suggestedAdditions"].is_null() {
        expect_array_of_strings(object, "suggestedAdditions")?;
    }

    // Shape is verified above; residual entry-field mismatches surface here.
    serde_json::from_value(value).map_err(|e| ValidateError::WrongType {
        key: "tailoredExperiences".to_string(),
        expected: "experience-shaped objects",
        actual: e.to_string(),
    })
}

fn expect_string(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<(), ValidateError> {
    if object[key].is_string() {
        Ok(())
    } else {
        Err(wrong_type(key, "string", &object[key]))
    }
}

fn expect_array_of_strings(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<(), ValidateError> {
    let items = object[key]
        .as_array()
        .ok_or_else(|| wrong_type(key, "array of strings", &object[key]))?;
    for (index, item) in items.iter().enumerate() {
        if !item.is_string() {
            return Err(wrong_type(&format!("{key}[{index}]"), "string", item));
        }
    }
    Ok(())
}

fn expect_array_of_objects(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<(), ValidateError> {
    let items = object[key]
        .as_array()
        .ok_or_else(|| wrong_type(key, "array of objects", &object[key]))?;
    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(wrong_type(&format!("{key}[{index}]"), "object", item));
        }
    }
    Ok(())
}

fn wrong_type(key: &str, expected: &'static str, actual: &Value) -> ValidateError {
    ValidateError::WrongType {
        key: key.to_string(),
        expected,
        actual: json_type_name(actual).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
