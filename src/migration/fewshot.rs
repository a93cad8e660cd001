//! Few-shot example migration
//!
//! Legacy examples ride along with their class: a display name, prompt
//! strings, and an image path. Migration renames the prompt fields into the
//! extension namespace and then tries to recover structured attribute values
//! from the free-text attributes prompt, since newer consumers read examples
//! as data rather than prose. Extraction is best effort and never fails the
//! migration.

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{NAME_KEY, X_ATTRIBUTES_PROMPT, X_CLASS_PROMPT, X_IMAGE_PATH};
use crate::legacy::LegacyExample;

/// Migrates a class's few-shot examples. Empty input yields an empty vec,
/// and records that end up carrying nothing are dropped.
pub fn migrate_examples(examples: &[LegacyExample]) -> Vec<Value> {
    let mut migrated = Vec::new();

    for example in examples {
        let mut record = Map::new();
        if let Some(name) = &example.name {
            record.insert(NAME_KEY.to_owned(), Value::from(name.clone()));
        }
        if let Some(prompt) = &example.class_prompt {
            record.insert(X_CLASS_PROMPT.to_owned(), Value::from(prompt.clone()));
        }
        if let Some(prompt) = &example.attributes_prompt {
            record.insert(X_ATTRIBUTES_PROMPT.to_owned(), Value::from(prompt.clone()));
        }
        if let Some(path) = &example.image_path {
            record.insert(X_IMAGE_PATH.to_owned(), Value::from(path.clone()));
        }

        if let Some(prompt) = &example.attributes_prompt {
            match extract_prompt_values(prompt) {
                // extracted keys may shadow the copied fields; last write wins
                Some(values) => record.extend(values),
                None => debug!(
                    example = example.name.as_deref().unwrap_or(""),
                    "no structured values recovered from attributes prompt"
                ),
            }
        }

        if !record.is_empty() {
            migrated.push(Value::Object(record));
        }
    }

    migrated
}

/// Best-effort extraction of attribute values from a free-text prompt.
/// Strategies run in order; the first that yields a mapping wins.
fn extract_prompt_values(prompt: &str) -> Option<Map<String, Value>> {
    extract_json_block(prompt).or_else(|| extract_quoted_pairs(prompt))
}

/// Strategy 1: the span from the first `{` to the last `}` (greedy, across
/// newlines), parsed as a JSON object.
fn extract_json_block(prompt: &str) -> Option<Map<String, Value>> {
    let block = Regex::new(r"(?s)\{.*\}").unwrap();
    let span = block.find(prompt)?;
    match serde_json::from_str(span.as_str()) {
        Ok(Value::Object(values)) => Some(values),
        _ => None,
    }
}

/// Strategy 2: harvest `"key": "value"` and `"key": null` fragments from
/// anywhere in the text and parse them as one synthetic JSON object, so
/// escape sequences inside values decode exactly as JSON would.
fn extract_quoted_pairs(prompt: &str) -> Option<Map<String, Value>> {
    let pair = Regex::new(r#""[^"]+"\s*:\s*(?:"[^"]*"|null)"#).unwrap();
    let fragments: Vec<&str> = pair.find_iter(prompt).map(|m| m.as_str()).collect();
    if fragments.is_empty() {
        return None;
    }

    let synthetic = format!("{{{}}}", fragments.join(", "));
    match serde_json::from_str(&synthetic) {
        Ok(Value::Object(values)) => Some(values),
        _ => None,
    }
}
