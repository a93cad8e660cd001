//! Shared field-name vocabulary for legacy and normalized configurations
//!
//! Both formats are manipulated as `serde_json` trees, so every key the
//! engine reads or writes is named here exactly once. Downstream consumers
//! (prompt builders, evaluators, the UI) match on these exact strings.

// ========== JSON Schema keywords ==========

pub const SCHEMA_KEY: &str = "$schema";
pub const ID_KEY: &str = "$id";
pub const REF_KEY: &str = "$ref";
pub const DEFS_KEY: &str = "$defs";
pub const TYPE_KEY: &str = "type";
pub const PROPERTIES_KEY: &str = "properties";
pub const ITEMS_KEY: &str = "items";
pub const REQUIRED_KEY: &str = "required";
pub const DESCRIPTION_KEY: &str = "description";
pub const EXAMPLES_KEY: &str = "examples";

/// Draft targeted by every schema document this engine emits.
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Local pointer prefix used by `$ref` values into the definitions table.
pub const DEFS_POINTER_PREFIX: &str = "#/$defs/";

pub const TYPE_STRING: &str = "string";
pub const TYPE_OBJECT: &str = "object";
pub const TYPE_ARRAY: &str = "array";

// ========== Legacy configuration keys ==========

pub const NAME_KEY: &str = "name";
pub const CLASSES_KEY: &str = "classes";
pub const ATTRIBUTES_KEY: &str = "attributes";
pub const ATTRIBUTE_TYPE_KEY: &str = "attributeType";
pub const GROUP_ATTRIBUTES_KEY: &str = "groupAttributes";
pub const LIST_ITEM_TEMPLATE_KEY: &str = "listItemTemplate";
pub const ITEM_DESCRIPTION_KEY: &str = "itemDescription";
pub const ITEM_ATTRIBUTES_KEY: &str = "itemAttributes";
pub const EVALUATION_METHOD_KEY: &str = "evaluation_method";
pub const CONFIDENCE_THRESHOLD_KEY: &str = "confidence_threshold";
pub const PROMPT_OVERRIDE_KEY: &str = "prompt_override";

/// `attributeType` tags. Anything else is treated as `simple`.
pub const KIND_SIMPLE: &str = "simple";
pub const KIND_GROUP: &str = "group";
pub const KIND_LIST: &str = "list";

// Legacy few-shot example keys
pub const CLASS_PROMPT_KEY: &str = "classPrompt";
pub const ATTRIBUTES_PROMPT_KEY: &str = "attributesPrompt";
pub const IMAGE_PATH_KEY: &str = "imagePath";

// ========== Docket extension fields ==========

/// Marks a class as a top-level document type. Boolean `true` on
/// intermediate classes, the class name on emitted schema documents.
pub const X_DOCUMENT_TYPE: &str = "x-docket-document-type";
pub const X_EVALUATION_METHOD: &str = "x-docket-evaluation-method";
pub const X_CONFIDENCE_THRESHOLD: &str = "x-docket-confidence-threshold";
pub const X_PROMPT_OVERRIDE: &str = "x-docket-prompt-override";
/// Legacy name of a single-item list attribute, kept on its `items` schema.
pub const X_ORIGINAL_NAME: &str = "x-docket-original-name";
pub const X_LIST_ITEM_DESCRIPTION: &str = "x-docket-list-item-description";
pub const X_CLASS_PROMPT: &str = "x-docket-class-prompt";
pub const X_ATTRIBUTES_PROMPT: &str = "x-docket-attributes-prompt";
pub const X_IMAGE_PATH: &str = "x-docket-image-path";

// ========== Validation limits ==========

/// Accepted values for the legacy `evaluation_method` field.
pub const VALID_EVALUATION_METHODS: [&str; 4] = ["EXACT", "NUMERIC_EXACT", "FUZZY", "SEMANTIC"];

/// Maximum length of a `prompt_override`, in characters.
pub const MAX_PROMPT_OVERRIDE_LEN: usize = 10_000;

/// Internal bookkeeping keys stripped from property schemas during assembly.
pub const SANITIZED_KEYS: [&str; 2] = ["id", "name"];
