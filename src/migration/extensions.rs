//! Extension-field validation
//!
//! Legacy attributes may carry `evaluation_method`, `confidence_threshold`,
//! and `prompt_override`. Migration copies them onto the schema property
//! under their `x-docket-` names, validating values on the way. These checks
//! are the only hard errors the engine raises; an attribute without
//! overrides migrates without gaining any extension keys.

use serde_json::{Map, Value};

use crate::constants::{
    MAX_PROMPT_OVERRIDE_LEN, VALID_EVALUATION_METHODS, X_CONFIDENCE_THRESHOLD,
    X_EVALUATION_METHOD, X_PROMPT_OVERRIDE,
};
use crate::error::{MigrationError, Result};
use crate::legacy::ExtensionOverrides;

/// Validates and copies all three override fields onto `target`, in the
/// fixed order evaluation method, confidence threshold, prompt override.
/// The first invalid field wins.
pub fn apply_overrides(
    target: &mut Map<String, Value>,
    attribute: &str,
    overrides: &ExtensionOverrides,
) -> Result<()> {
    apply_scoring_overrides(target, attribute, overrides)?;

    if let Some(prompt) = &overrides.prompt_override {
        let text = prompt
            .as_str()
            .ok_or_else(|| MigrationError::InvalidPromptOverrideType {
                attribute: attribute.to_owned(),
                found: json_type_name(prompt).to_owned(),
            })?;
        let length = text.chars().count();
        if length > MAX_PROMPT_OVERRIDE_LEN {
            return Err(MigrationError::PromptOverrideTooLong {
                attribute: attribute.to_owned(),
                length,
                limit: MAX_PROMPT_OVERRIDE_LEN,
            });
        }
        target.insert(X_PROMPT_OVERRIDE.to_owned(), prompt.clone());
    }

    Ok(())
}

/// Validates and copies the evaluation-method and confidence-threshold
/// overrides only. List attributes take this path: their prompt behavior
/// lives in the item template, so a list-level prompt override is ignored.
pub fn apply_scoring_overrides(
    target: &mut Map<String, Value>,
    attribute: &str,
    overrides: &ExtensionOverrides,
) -> Result<()> {
    if let Some(method) = &overrides.evaluation_method {
        let valid = method
            .as_str()
            .is_some_and(|m| VALID_EVALUATION_METHODS.contains(&m));
        if !valid {
            return Err(MigrationError::InvalidEvaluationMethod {
                attribute: attribute.to_owned(),
                value: render(method),
            });
        }
        target.insert(X_EVALUATION_METHOD.to_owned(), method.clone());
    }

    if let Some(raw) = &overrides.confidence_threshold {
        let threshold =
            parse_threshold(raw).ok_or_else(|| MigrationError::InvalidConfidenceThreshold {
                attribute: attribute.to_owned(),
                value: render(raw),
            })?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MigrationError::ThresholdOutOfRange {
                attribute: attribute.to_owned(),
                value: threshold,
            });
        }
        // stored numerically even when the legacy value was a string
        target.insert(X_CONFIDENCE_THRESHOLD.to_owned(), Value::from(threshold));
    }

    Ok(())
}

/// Accepts JSON numbers and numeric strings; everything else is rejected.
/// NaN and infinities parse but fail the closed-range check afterwards.
fn parse_threshold(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Error-message rendering: bare strings stay bare, everything else is
/// serialized JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
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
