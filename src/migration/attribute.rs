//! Attribute conversion
//!
//! Each legacy attribute kind maps to one schema property shape: simple to a
//! string property, group to a nested object, list to an array whose item
//! schema comes from the template. Property key order is stable: type and
//! description first, structural keys next, extension keys last.

use serde_json::{Map, Value};

use crate::constants::{
    DESCRIPTION_KEY, ITEMS_KEY, PROPERTIES_KEY, TYPE_ARRAY, TYPE_KEY, TYPE_OBJECT, TYPE_STRING,
    X_LIST_ITEM_DESCRIPTION, X_ORIGINAL_NAME,
};
use crate::error::Result;
use crate::legacy::{GroupAttribute, LegacyAttribute, ListAttribute, SimpleAttribute};
use crate::migration::extensions::{apply_overrides, apply_scoring_overrides};

/// Converts one legacy attribute into its schema property.
pub fn migrate_attribute(attr: &LegacyAttribute) -> Result<Value> {
    match attr {
        LegacyAttribute::Simple(simple) => {
            Ok(Value::Object(simple_property(simple, simple.key())?))
        }
        LegacyAttribute::Group(group) => migrate_group(group),
        LegacyAttribute::List(list) => migrate_list(list),
    }
}

/// `{type: "string", description}` plus validated extension overrides.
/// `path` is the dotted location reported on validation failure.
fn simple_property(attr: &SimpleAttribute, path: &str) -> Result<Map<String, Value>> {
    let mut property = Map::new();
    property.insert(TYPE_KEY.to_owned(), Value::from(TYPE_STRING));
    property.insert(
        DESCRIPTION_KEY.to_owned(),
        Value::from(attr.description.clone()),
    );
    apply_overrides(&mut property, path, &attr.overrides)?;
    Ok(property)
}

/// Groups become nested objects; every child migrates as simple. Children
/// validate before the group's own overrides, so a bad child surfaces first.
fn migrate_group(attr: &GroupAttribute) -> Result<Value> {
    let mut property = Map::new();
    property.insert(TYPE_KEY.to_owned(), Value::from(TYPE_OBJECT));
    property.insert(
        DESCRIPTION_KEY.to_owned(),
        Value::from(attr.description.clone()),
    );

    let mut children = Map::new();
    for child in &attr.group_attributes {
        let child_path = format!("{}.{}", attr.key(), child.key());
        children.insert(
            child.key().to_owned(),
            Value::Object(simple_property(child, &child_path)?),
        );
    }
    property.insert(PROPERTIES_KEY.to_owned(), Value::Object(children));

    apply_overrides(&mut property, attr.key(), &attr.overrides)?;
    Ok(Value::Object(property))
}

/// Lists become arrays. A single-item template migrates to a direct item
/// schema tagged with the item's original legacy name; zero or several item
/// attributes migrate to an object item schema. The list's own overrides go
/// through the scoring path only.
fn migrate_list(attr: &ListAttribute) -> Result<Value> {
    let mut property = Map::new();
    property.insert(TYPE_KEY.to_owned(), Value::from(TYPE_ARRAY));
    property.insert(
        DESCRIPTION_KEY.to_owned(),
        Value::from(attr.description.clone()),
    );

    let template = &attr.item_template;
    if let Some(item_description) = &template.item_description {
        property.insert(
            X_LIST_ITEM_DESCRIPTION.to_owned(),
            Value::from(item_description.clone()),
        );
    }

    let items = if let [item] = template.item_attributes.as_slice() {
        let item_path = format!("{}.{}", attr.key(), item.key());
        let mut item_schema = simple_property(item, &item_path)?;
        if let Some(original) = &item.name {
            item_schema.insert(X_ORIGINAL_NAME.to_owned(), Value::from(original.clone()));
        }
        Value::Object(item_schema)
    } else {
        let mut item_properties = Map::new();
        for item in &template.item_attributes {
            let item_path = format!("{}.{}", attr.key(), item.key());
            item_properties.insert(
                item.key().to_owned(),
                Value::Object(simple_property(item, &item_path)?),
            );
        }
        let mut item_object = Map::new();
        item_object.insert(TYPE_KEY.to_owned(), Value::from(TYPE_OBJECT));
        item_object.insert(PROPERTIES_KEY.to_owned(), Value::Object(item_properties));
        Value::Object(item_object)
    };
    property.insert(ITEMS_KEY.to_owned(), items);

    apply_scoring_overrides(&mut property, attr.key(), &attr.overrides)?;
    Ok(Value::Object(property))
}
