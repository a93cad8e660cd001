//! Schema document assembly
//!
//! The last migration stage: classes in intermediate form become standalone
//! JSON Schema documents, one per document-type class, each carrying its
//! transitively referenced component classes under `$defs`. Assembly also
//! strips internal bookkeeping fields from every property schema on the way
//! out.

use serde_json::{Map, Value};

use crate::constants::{
    ATTRIBUTES_KEY, DEFS_KEY, DESCRIPTION_KEY, EXAMPLES_KEY, ID_KEY, ITEMS_KEY, NAME_KEY,
    PROPERTIES_KEY, REQUIRED_KEY, SANITIZED_KEYS, SCHEMA_DRAFT, SCHEMA_KEY, TYPE_KEY, TYPE_OBJECT,
    X_DOCUMENT_TYPE,
};
use crate::migration::is_truthy;
use crate::migration::refs::find_referenced_classes;

/// Converts intermediate classes into finished schema documents, one per
/// document-type class, in input order. Empty input yields an empty vec.
///
/// When no class carries the document-type flag the first class is promoted
/// to sole document type, mutated in place so self references resolve
/// consistently during the walk. Promotion requires the flag to be exactly
/// `true`; reference skipping elsewhere accepts any truthy marker.
pub fn assemble_schemas(mut classes: Vec<Value>) -> Vec<Value> {
    if classes.is_empty() {
        return Vec::new();
    }

    let mut doc_type_indices: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter(|(_, class)| class.get(X_DOCUMENT_TYPE) == Some(&Value::Bool(true)))
        .map(|(index, _)| index)
        .collect();

    if doc_type_indices.is_empty() {
        if let Some(first) = classes.first_mut().and_then(Value::as_object_mut) {
            first.insert(X_DOCUMENT_TYPE.to_owned(), Value::Bool(true));
        }
        doc_type_indices.push(0);
    }

    let mut schemas = Vec::with_capacity(doc_type_indices.len());
    for index in doc_type_indices {
        schemas.push(build_document(&classes[index], &classes));
    }
    schemas
}

fn build_document(doc_type_class: &Value, all_classes: &[Value]) -> Value {
    let referenced = find_referenced_classes(doc_type_class, all_classes);

    let mut defs = Map::new();
    for component in referenced {
        let def_name = component
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let mut def = Map::new();
        def.insert(TYPE_KEY.to_owned(), Value::from(TYPE_OBJECT));
        def.insert(
            PROPERTIES_KEY.to_owned(),
            Value::Object(sanitized_properties(component)),
        );
        if let Some(description) = component.get(DESCRIPTION_KEY) {
            if is_truthy(Some(description)) {
                def.insert(DESCRIPTION_KEY.to_owned(), description.clone());
            }
        }
        if let Some(required) = class_required(component) {
            def.insert(REQUIRED_KEY.to_owned(), required.clone());
        }
        defs.insert(def_name, Value::Object(def));
    }

    let class_name = doc_type_class
        .get(NAME_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut schema = Map::new();
    schema.insert(SCHEMA_KEY.to_owned(), Value::from(SCHEMA_DRAFT));
    schema.insert(ID_KEY.to_owned(), Value::from(class_name));
    schema.insert(X_DOCUMENT_TYPE.to_owned(), Value::from(class_name));
    schema.insert(TYPE_KEY.to_owned(), Value::from(TYPE_OBJECT));
    schema.insert(
        PROPERTIES_KEY.to_owned(),
        Value::Object(sanitized_properties(doc_type_class)),
    );

    if let Some(description) = doc_type_class.get(DESCRIPTION_KEY) {
        if is_truthy(Some(description)) {
            schema.insert(DESCRIPTION_KEY.to_owned(), description.clone());
        }
    }
    if let Some(required) = class_required(doc_type_class) {
        schema.insert(REQUIRED_KEY.to_owned(), required.clone());
    }
    if let Some(examples) = doc_type_class.get(EXAMPLES_KEY) {
        if is_truthy(Some(examples)) {
            schema.insert(EXAMPLES_KEY.to_owned(), examples.clone());
        }
    }
    if !defs.is_empty() {
        schema.insert(DEFS_KEY.to_owned(), Value::Object(defs));
    }

    Value::Object(schema)
}

/// The class's `attributes.properties` entries, each sanitized; empty when
/// the class has no well-formed properties map.
fn sanitized_properties(class: &Value) -> Map<String, Value> {
    class
        .get(ATTRIBUTES_KEY)
        .and_then(|attributes| attributes.get(PROPERTIES_KEY))
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| (name.clone(), sanitize_property_schema(property)))
                .collect()
        })
        .unwrap_or_default()
}

fn class_required(class: &Value) -> Option<&Value> {
    let required = class
        .get(ATTRIBUTES_KEY)
        .and_then(|attributes| attributes.get(REQUIRED_KEY))?;
    is_truthy(Some(required)).then_some(required)
}

/// Recursively strips internal bookkeeping keys (`id`, `name`) from a
/// property schema, descending through `items` and nested `properties`.
/// Non-object values pass through untouched.
pub fn sanitize_property_schema(property: &Value) -> Value {
    let Some(obj) = property.as_object() else {
        return property.clone();
    };

    let mut sanitized = Map::new();
    for (key, value) in obj {
        if SANITIZED_KEYS.contains(&key.as_str()) {
            continue;
        }
        sanitized.insert(key.clone(), value.clone());
    }

    if let Some(items) = sanitized.get(ITEMS_KEY) {
        let cleaned = sanitize_property_schema(items);
        sanitized.insert(ITEMS_KEY.to_owned(), cleaned);
    }

    if let Some(nested) = sanitized.get(PROPERTIES_KEY).and_then(Value::as_object) {
        let cleaned: Map<String, Value> = nested
            .iter()
            .map(|(name, value)| (name.clone(), sanitize_property_schema(value)))
            .collect();
        sanitized.insert(PROPERTIES_KEY.to_owned(), Value::Object(cleaned));
    }

    Value::Object(sanitized)
}
