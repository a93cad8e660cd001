//! Cross-class reference resolution
//!
//! Normalized classes can point at shared component classes through local
//! `$ref` pointers. Assembly embeds those components into each document's
//! `$defs`, so this module walks a class's properties and returns every
//! transitively referenced class in discovery order. The walk threads an
//! owned visited set, which makes reference cycles terminate and keeps each
//! component listed once.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{
    ATTRIBUTES_KEY, DEFS_POINTER_PREFIX, ITEMS_KEY, NAME_KEY, PROPERTIES_KEY, REF_KEY, TYPE_KEY,
    TYPE_OBJECT, X_DOCUMENT_TYPE,
};
use crate::migration::is_truthy;

/// Returns the classes transitively referenced by `root_class`, in the order
/// they are first discovered. Document-type classes are never returned: they
/// stand alone as documents rather than being embedded. Unresolvable
/// references are skipped silently.
pub fn find_referenced_classes<'a>(
    root_class: &Value,
    all_classes: &'a [Value],
) -> Vec<&'a Value> {
    let mut visited = HashSet::new();
    let mut referenced = Vec::new();
    collect_references(root_class, all_classes, &mut visited, &mut referenced);
    referenced
}

fn collect_references<'a>(
    root_class: &Value,
    all_classes: &'a [Value],
    visited: &mut HashSet<String>,
    referenced: &mut Vec<&'a Value>,
) {
    let properties = root_class
        .get(ATTRIBUTES_KEY)
        .and_then(|attributes| attributes.get(PROPERTIES_KEY))
        .and_then(Value::as_object);
    if let Some(properties) = properties {
        process_properties(properties, all_classes, visited, referenced);
    }
}

fn process_properties<'a>(
    properties: &Map<String, Value>,
    all_classes: &'a [Value],
    visited: &mut HashSet<String>,
    referenced: &mut Vec<&'a Value>,
) {
    for attr in properties.values() {
        // direct $ref
        if let Some(pointer) = attr.get(REF_KEY).and_then(Value::as_str) {
            follow_reference(pointer, all_classes, visited, referenced);
        }

        // array items $ref
        if let Some(pointer) = attr
            .get(ITEMS_KEY)
            .and_then(|items| items.get(REF_KEY))
            .and_then(Value::as_str)
        {
            follow_reference(pointer, all_classes, visited, referenced);
        }

        // nested object properties
        let is_object = attr.get(TYPE_KEY).and_then(Value::as_str) == Some(TYPE_OBJECT);
        if is_object {
            if let Some(nested) = attr.get(PROPERTIES_KEY).and_then(Value::as_object) {
                process_properties(nested, all_classes, visited, referenced);
            }
        }
    }
}

/// Resolves one pointer. The target is accepted once: it is marked visited
/// before its own references are walked, which is what terminates cycles.
fn follow_reference<'a>(
    pointer: &str,
    all_classes: &'a [Value],
    visited: &mut HashSet<String>,
    referenced: &mut Vec<&'a Value>,
) {
    let ref_name = pointer.replace(DEFS_POINTER_PREFIX, "");
    if visited.contains(&ref_name) {
        return;
    }

    let ref_class = all_classes
        .iter()
        .find(|class| class.get(NAME_KEY).and_then(Value::as_str) == Some(ref_name.as_str()));

    match ref_class {
        Some(class) if !is_truthy(class.get(X_DOCUMENT_TYPE)) => {
            visited.insert(ref_name);
            referenced.push(class);
            collect_references(class, all_classes, visited, referenced);
        }
        Some(_) => {
            // document types are emitted as their own schemas, never embedded
        }
        None => debug!(reference = %ref_name, "skipping unresolvable class reference"),
    }
}
