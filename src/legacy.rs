//! Typed model of the legacy flat-attribute configuration
//!
//! Legacy class lists arrive as raw JSON and are lifted into these types
//! once, at the boundary. Parsing is deliberately lenient: missing names and
//! descriptions default to empty strings, unrecognized `attributeType` tags
//! fall back to `simple`, and entries that are not objects are skipped. The
//! engine's only hard failures are extension-value checks, which run later
//! against the raw override values carried here.

use serde_json::{Map, Value};

use crate::constants::{
    ATTRIBUTES_KEY, ATTRIBUTES_PROMPT_KEY, ATTRIBUTE_TYPE_KEY, CLASS_PROMPT_KEY,
    CONFIDENCE_THRESHOLD_KEY, DESCRIPTION_KEY, EVALUATION_METHOD_KEY, EXAMPLES_KEY,
    GROUP_ATTRIBUTES_KEY, IMAGE_PATH_KEY, ITEM_ATTRIBUTES_KEY, ITEM_DESCRIPTION_KEY, KIND_GROUP,
    KIND_LIST, KIND_SIMPLE, LIST_ITEM_TEMPLATE_KEY, NAME_KEY, PROMPT_OVERRIDE_KEY,
};

/// Raw extension override values lifted off a legacy attribute.
///
/// Values stay untyped on purpose. Validation converts and checks them when
/// the attribute is migrated, so a bad threshold surfaces as a typed
/// migration error instead of a parse failure here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionOverrides {
    pub evaluation_method: Option<Value>,
    pub confidence_threshold: Option<Value>,
    pub prompt_override: Option<Value>,
}

impl ExtensionOverrides {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            evaluation_method: obj.get(EVALUATION_METHOD_KEY).cloned(),
            confidence_threshold: obj.get(CONFIDENCE_THRESHOLD_KEY).cloned(),
            prompt_override: obj.get(PROMPT_OVERRIDE_KEY).cloned(),
        }
    }
}

/// A leaf attribute that extracts a single string value.
///
/// Group children and list item attributes are always modeled as simple,
/// whatever their own `attributeType` says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleAttribute {
    /// `None` when the legacy object had no `name` key. The distinction
    /// matters for single-item lists, which only record an original-name
    /// extension when a name was actually present.
    pub name: Option<String>,
    pub description: String,
    pub overrides: ExtensionOverrides,
}

impl SimpleAttribute {
    pub(crate) fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: string_key(obj, NAME_KEY),
            description: string_key(obj, DESCRIPTION_KEY).unwrap_or_default(),
            overrides: ExtensionOverrides::from_object(obj),
        }
    }

    /// Name used as the property key; unnamed attributes key on "".
    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A nested object attribute holding a flat set of simple children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAttribute {
    pub name: Option<String>,
    pub description: String,
    pub overrides: ExtensionOverrides,
    pub group_attributes: Vec<SimpleAttribute>,
}

impl GroupAttribute {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: string_key(obj, NAME_KEY),
            description: string_key(obj, DESCRIPTION_KEY).unwrap_or_default(),
            overrides: ExtensionOverrides::from_object(obj),
            group_attributes: simple_attributes(obj.get(GROUP_ATTRIBUTES_KEY)),
        }
    }

    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// The per-item shape of a list attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItemTemplate {
    pub item_description: Option<String>,
    pub item_attributes: Vec<SimpleAttribute>,
}

impl ListItemTemplate {
    fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self {
                item_description: string_key(obj, ITEM_DESCRIPTION_KEY),
                item_attributes: simple_attributes(obj.get(ITEM_ATTRIBUTES_KEY)),
            },
            None => Self::default(),
        }
    }
}

/// A repeated attribute described by an item template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAttribute {
    pub name: Option<String>,
    pub description: String,
    pub overrides: ExtensionOverrides,
    pub item_template: ListItemTemplate,
}

impl ListAttribute {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: string_key(obj, NAME_KEY),
            description: string_key(obj, DESCRIPTION_KEY).unwrap_or_default(),
            overrides: ExtensionOverrides::from_object(obj),
            item_template: obj
                .get(LIST_ITEM_TEMPLATE_KEY)
                .map(ListItemTemplate::from_value)
                .unwrap_or_default(),
        }
    }

    pub fn key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// The closed set of legacy attribute kinds.
///
/// Resolved exactly once at the parse boundary, so migration code downstream
/// can match exhaustively instead of re-reading tag strings.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyAttribute {
    Simple(SimpleAttribute),
    Group(GroupAttribute),
    List(ListAttribute),
}

impl LegacyAttribute {
    /// Parses one attribute entry. Non-object entries carry nothing usable
    /// and return `None`, which callers skip.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = obj
            .get(ATTRIBUTE_TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or(KIND_SIMPLE);
        Some(match kind {
            KIND_GROUP => Self::Group(GroupAttribute::from_object(obj)),
            KIND_LIST => Self::List(ListAttribute::from_object(obj)),
            // unknown tags degrade to simple instead of failing
            _ => Self::Simple(SimpleAttribute::from_object(obj)),
        })
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Simple(attr) => attr.key(),
            Self::Group(attr) => attr.key(),
            Self::List(attr) => attr.key(),
        }
    }
}

/// One legacy few-shot example record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyExample {
    pub name: Option<String>,
    pub class_prompt: Option<String>,
    pub attributes_prompt: Option<String>,
    pub image_path: Option<String>,
}

impl LegacyExample {
    /// Total over any JSON value; non-object entries parse to an empty
    /// record, which migration later drops.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self {
                name: string_key(obj, NAME_KEY),
                class_prompt: string_key(obj, CLASS_PROMPT_KEY),
                attributes_prompt: string_key(obj, ATTRIBUTES_PROMPT_KEY),
                image_path: string_key(obj, IMAGE_PATH_KEY),
            },
            None => Self::default(),
        }
    }
}

/// One legacy document class: a name, a description, a flat attribute list,
/// and optional few-shot examples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyClass {
    pub name: String,
    pub description: String,
    pub attributes: Vec<LegacyAttribute>,
    pub examples: Vec<LegacyExample>,
}

impl LegacyClass {
    /// Parses one raw class entry, tolerating any malformed shape.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            name: string_key(obj, NAME_KEY).unwrap_or_default(),
            description: string_key(obj, DESCRIPTION_KEY).unwrap_or_default(),
            attributes: obj
                .get(ATTRIBUTES_KEY)
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(LegacyAttribute::from_value)
                        .collect()
                })
                .unwrap_or_default(),
            examples: obj
                .get(EXAMPLES_KEY)
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(LegacyExample::from_value).collect())
                .unwrap_or_default(),
        }
    }
}

fn string_key(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn simple_attributes(value: Option<&Value>) -> Vec<SimpleAttribute> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(SimpleAttribute::from_object)
                .collect()
        })
        .unwrap_or_default()
}
