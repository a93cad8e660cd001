//! Legacy-to-schema migration pipeline
//!
//! The stages, in call order:
//!
//! 1. [`crate::detect`] decides whether a payload needs migrating at all.
//! 2. [`crate::legacy`] lifts raw classes into the typed legacy model.
//! 3. [`attribute`] converts each attribute into a schema property, with
//!    extension-field validation in [`extensions`].
//! 4. [`fewshot`] carries example records across, mining prompt text for
//!    structured values.
//! 5. [`assemble`] resolves cross-class references ([`refs`]) and emits one
//!    finished schema document per document type.
//!
//! The pipeline is pure: no I/O, no caches, nothing retained between calls.
//! Repeated application is a no-op because already-normalized data passes
//! through [`migrate_if_legacy`] untouched.

pub mod assemble;
pub mod attribute;
pub mod extensions;
pub mod fewshot;
pub mod refs;

pub use assemble::{assemble_schemas, sanitize_property_schema};
pub use attribute::migrate_attribute;
pub use extensions::{apply_overrides, apply_scoring_overrides};
pub use fewshot::migrate_examples;
pub use refs::find_referenced_classes;

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{
    ATTRIBUTES_KEY, CLASSES_KEY, DESCRIPTION_KEY, EXAMPLES_KEY, NAME_KEY, PROPERTIES_KEY,
    REQUIRED_KEY, TYPE_KEY, TYPE_OBJECT, X_DOCUMENT_TYPE,
};
use crate::detect::is_legacy_format;
use crate::error::Result;
use crate::legacy::LegacyClass;

/// Migrates legacy classes into finished schema documents.
///
/// Every legacy class becomes a document type in the normalized form. The
/// result is always an array of documents, even for a single class.
pub fn migrate_legacy_to_schema(legacy_classes: &[Value]) -> Result<Vec<Value>> {
    let mut intermediate = Vec::with_capacity(legacy_classes.len());

    for raw_class in legacy_classes {
        let LegacyClass {
            name,
            description,
            attributes,
            examples,
        } = LegacyClass::from_value(raw_class);

        let mut properties = Map::new();
        for attr in &attributes {
            // duplicate names collapse to the last definition
            properties.insert(attr.key().to_owned(), migrate_attribute(attr)?);
        }

        let mut attribute_schema = Map::new();
        attribute_schema.insert(TYPE_KEY.to_owned(), Value::from(TYPE_OBJECT));
        attribute_schema.insert(PROPERTIES_KEY.to_owned(), Value::Object(properties));
        attribute_schema.insert(REQUIRED_KEY.to_owned(), Value::Array(Vec::new()));

        let mut migrated = Map::new();
        migrated.insert(NAME_KEY.to_owned(), Value::from(name));
        migrated.insert(DESCRIPTION_KEY.to_owned(), Value::from(description));
        migrated.insert(X_DOCUMENT_TYPE.to_owned(), Value::Bool(true));
        migrated.insert(ATTRIBUTES_KEY.to_owned(), Value::Object(attribute_schema));

        let migrated_examples = migrate_examples(&examples);
        if !migrated_examples.is_empty() {
            migrated.insert(EXAMPLES_KEY.to_owned(), Value::Array(migrated_examples));
        }

        intermediate.push(Value::Object(migrated));
    }

    Ok(assemble_schemas(intermediate))
}

/// Migrates `data` when it is legacy, returns it unchanged otherwise.
///
/// A single legacy class object is treated as a one-element class list, so
/// the migrated result is still an array of schema documents.
pub fn migrate_if_legacy(data: &Value) -> Result<Value> {
    if !is_legacy_format(data) {
        return Ok(data.clone());
    }

    let documents = match data {
        Value::Array(classes) => migrate_legacy_to_schema(classes)?,
        single => migrate_legacy_to_schema(std::slice::from_ref(single))?,
    };
    Ok(Value::Array(documents))
}

/// Applies migrate-if-legacy to a stored configuration document.
///
/// Configuration documents usually wrap their class list under a `classes`
/// key; only that section is rewritten and every other key is preserved.
/// Documents without the wrapper take the whole-value path.
pub fn migrate_config_document(document: &Value) -> Result<Value> {
    match document.as_object() {
        Some(obj) if obj.contains_key(CLASSES_KEY) => {
            let mut updated = obj.clone();
            if let Some(classes) = obj.get(CLASSES_KEY) {
                if is_legacy_format(classes) {
                    debug!("migrating legacy classes section to schema format");
                    updated.insert(CLASSES_KEY.to_owned(), migrate_if_legacy(classes)?);
                }
            }
            Ok(Value::Object(updated))
        }
        _ => migrate_if_legacy(document),
    }
}

/// A marker value counts as set when it is `true`, a non-zero number, or a
/// non-empty string, array, or object.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(entries)) => !entries.is_empty(),
    }
}
