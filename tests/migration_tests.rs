//! End-to-End Migration Tests
//!
//! Drives complete legacy configurations from tests/fixtures through format
//! detection, migration, and schema assembly, and checks the shape of the
//! emitted schema documents.

use serde_json::{json, Value};

use docket_schemas::{
    assemble_schemas, is_legacy_format, is_schema_format, migrate_config_document,
    migrate_if_legacy, migrate_legacy_to_schema, MigrationError,
};

fn fixture(content: &str) -> Value {
    serde_json::from_str(content).unwrap()
}

// =============================================================================
// Letter: full migration with few-shot examples
// =============================================================================

#[test]
fn test_letter_fixture_is_detected_as_legacy() {
    let classes = fixture(include_str!("fixtures/legacy_letter.json"));
    assert!(is_legacy_format(&classes));
    assert!(!is_schema_format(&classes));
}

#[test]
fn test_letter_migrates_to_one_schema_document() {
    let classes = fixture(include_str!("fixtures/legacy_letter.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();

    assert_eq!(migrated.len(), 1, "Should have one schema");
    let schema = &migrated[0];

    assert_eq!(schema["$schema"], json!("https://json-schema.org/draft/2020-12/schema"));
    assert_eq!(schema["$id"], json!("letter"));
    assert_eq!(schema["x-docket-document-type"], json!("letter"));
    assert_eq!(schema["type"], json!("object"));
    assert_eq!(
        schema["description"],
        json!("A formal written correspondence with sender and recipient addresses")
    );
    assert_eq!(
        schema["properties"]["sender_name"],
        json!({"type": "string", "description": "The name of the person who sent the letter"})
    );
    assert_eq!(
        schema["properties"]["recipient_name"],
        json!({"type": "string", "description": "The name of the person receiving the letter"})
    );
}

#[test]
fn test_letter_examples_carry_prompts_and_extracted_values() {
    let classes = fixture(include_str!("fixtures/legacy_letter.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();
    let examples = migrated[0]["examples"].as_array().unwrap();

    assert_eq!(examples.len(), 2, "Should have 2 examples");

    // first example: key-value pairs harvested from prose
    let example1 = &examples[0];
    assert_eq!(example1["name"], json!("Letter1"));
    assert_eq!(
        example1["x-docket-class-prompt"],
        json!("This is an example of the class 'letter'")
    );
    assert_eq!(
        example1["x-docket-image-path"],
        json!("config_library/pattern-2/example-images/letter1.jpg")
    );
    assert!(example1.get("x-docket-attributes-prompt").is_some());
    assert_eq!(example1["sender_name"], json!("Will E. Clark"));
    assert_eq!(example1["recipient_name"], json!("The Honorable Wendell H. Ford"));
    assert_eq!(example1["date"], json!("10/31/1995"));
    assert_eq!(example1["subject"], json!(null));

    // second example: an embedded JSON block parsed whole
    let example2 = &examples[1];
    assert_eq!(example2["name"], json!("Letter2"));
    assert_eq!(example2["sender_name"], json!("William H. W. Anderson"));
    assert_eq!(example2["date"], json!("10/14/1970"));
}

#[test]
fn test_migrated_output_is_schema_format() {
    let classes = fixture(include_str!("fixtures/legacy_letter.json"));
    let migrated = migrate_if_legacy(&classes).unwrap();

    assert!(!is_legacy_format(&migrated));
    assert!(is_schema_format(&migrated));
}

#[test]
fn test_migration_is_idempotent() {
    let classes = fixture(include_str!("fixtures/legacy_letter.json"));
    let first = migrate_if_legacy(&classes).unwrap();
    let second = migrate_if_legacy(&first).unwrap();

    assert_eq!(first, second, "Re-migrating normalized output should be a no-op");
}

// =============================================================================
// Invoice: all three attribute kinds
// =============================================================================

#[test]
fn test_invoice_simple_attribute_with_overrides() {
    let classes = fixture(include_str!("fixtures/legacy_invoice.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();

    assert_eq!(
        migrated[0]["properties"]["invoice_number"],
        json!({
            "type": "string",
            "description": "The invoice number",
            "x-docket-evaluation-method": "EXACT",
            "x-docket-confidence-threshold": 0.9
        })
    );
}

#[test]
fn test_invoice_group_becomes_nested_object() {
    let classes = fixture(include_str!("fixtures/legacy_invoice.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();
    let vendor = &migrated[0]["properties"]["vendor"];

    assert_eq!(vendor["type"], json!("object"));
    assert_eq!(
        vendor["properties"]["vendor_name"],
        json!({"type": "string", "description": "Vendor legal name"})
    );
    assert_eq!(
        vendor["properties"]["vendor_address"],
        json!({"type": "string", "description": "Vendor mailing address"})
    );
}

#[test]
fn test_invoice_multi_item_list_builds_object_items() {
    let classes = fixture(include_str!("fixtures/legacy_invoice.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();
    let line_items = &migrated[0]["properties"]["line_items"];

    assert_eq!(line_items["type"], json!("array"));
    assert_eq!(line_items["x-docket-list-item-description"], json!("One billed line"));
    assert_eq!(line_items["x-docket-evaluation-method"], json!("FUZZY"));
    assert_eq!(line_items["items"]["type"], json!("object"));
    assert_eq!(
        line_items["items"]["properties"]["amount"],
        json!({
            "type": "string",
            "description": "Line amount",
            "x-docket-evaluation-method": "NUMERIC_EXACT"
        })
    );
}

#[test]
fn test_invoice_single_item_list_keeps_original_name() {
    let classes = fixture(include_str!("fixtures/legacy_invoice.json"));
    let migrated = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap();
    let po_numbers = &migrated[0]["properties"]["po_numbers"];

    assert_eq!(
        po_numbers["items"],
        json!({
            "type": "string",
            "description": "One purchase order number",
            "x-docket-original-name": "po_number"
        })
    );
}

// =============================================================================
// Reference hoisting into $defs
// =============================================================================

#[test]
fn test_reference_chain_hoists_transitive_defs() {
    let classes = fixture(include_str!("fixtures/reference_chain.json"));
    let schemas = assemble_schemas(classes.as_array().unwrap().clone());

    // only the flagged document type produces a schema
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0]["$id"], json!("claim"));

    // party comes in through a direct $ref, damage through items, address
    // transitively through party's nested contact object
    let defs = schemas[0]["$defs"].as_object().unwrap();
    let names: Vec<&str> = defs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["party", "address", "damage"]);
}

#[test]
fn test_defs_carry_description_and_required() {
    let classes = fixture(include_str!("fixtures/reference_chain.json"));
    let schemas = assemble_schemas(classes.as_array().unwrap().clone());
    let party = &schemas[0]["$defs"]["party"];

    assert_eq!(party["type"], json!("object"));
    assert_eq!(party["description"], json!("A person or company named on the claim"));
    assert_eq!(party["required"], json!(["full_name"]));
}

#[test]
fn test_internal_bookkeeping_fields_are_sanitized() {
    let classes = fixture(include_str!("fixtures/reference_chain.json"));
    let schemas = assemble_schemas(classes.as_array().unwrap().clone());
    let full_name = &schemas[0]["$defs"]["party"]["properties"]["full_name"];

    assert!(full_name.get("id").is_none());
    assert!(full_name.get("name").is_none());
    assert_eq!(full_name["type"], json!("string"));
    assert_eq!(full_name["description"], json!("Legal name"));
}

#[test]
fn test_defs_never_nest_their_own_defs() {
    let classes = fixture(include_str!("fixtures/reference_chain.json"));
    let schemas = assemble_schemas(classes.as_array().unwrap().clone());

    for (name, def) in schemas[0]["$defs"].as_object().unwrap() {
        assert!(def.get("$defs").is_none(), "$defs entry '{}' should stay flat", name);
    }
}

#[test]
fn test_unflagged_classes_fall_back_to_first_as_document_type() {
    let classes = json!([
        {
            "name": "memo",
            "description": "An internal memo",
            "attributes": {"type": "object", "properties": {}, "required": []}
        },
        {
            "name": "aside",
            "description": "Never promoted",
            "attributes": {"type": "object", "properties": {}, "required": []}
        }
    ]);
    let schemas = assemble_schemas(classes.as_array().unwrap().clone());

    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0]["$id"], json!("memo"));
    assert_eq!(schemas[0]["x-docket-document-type"], json!("memo"));
}

// =============================================================================
// Stored configuration documents
// =============================================================================

#[test]
fn test_yaml_config_document_migrates_classes_section_only() {
    let document: Value =
        serde_yaml::from_str(include_str!("fixtures/legacy_config.yaml")).unwrap();
    let migrated = migrate_config_document(&document).unwrap();

    // sibling sections survive untouched
    assert_eq!(migrated["notes"]["owner"], json!("platform-team"));
    assert_eq!(migrated["notes"]["model"], json!("default"));

    let classes = migrated["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["$id"], json!("receipt"));
    assert_eq!(
        classes[0]["properties"]["total"]["x-docket-confidence-threshold"],
        json!(0.75)
    );

    // running the migrated document through again changes nothing
    assert_eq!(migrate_config_document(&migrated).unwrap(), migrated);
}

// =============================================================================
// Validation failures
// =============================================================================

#[test]
fn test_out_of_range_threshold_fails_the_migration() {
    let classes = json!([{
        "name": "invoice",
        "description": "d",
        "attributes": [
            {"name": "total", "description": "Total", "confidence_threshold": 1.5}
        ]
    }]);
    let err = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap_err();

    match err {
        MigrationError::ThresholdOutOfRange { attribute, value } => {
            assert_eq!(attribute, "total");
            assert_eq!(value, 1.5);
        }
        other => panic!("Expected ThresholdOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_invalid_evaluation_method_names_the_attribute() {
    let classes = json!([{
        "name": "invoice",
        "attributes": [
            {"name": "total", "evaluation_method": "GUESS"}
        ]
    }]);
    let err = migrate_legacy_to_schema(classes.as_array().unwrap()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("GUESS"), "message should name the bad value: {}", message);
    assert!(message.contains("total"), "message should name the attribute: {}", message);
}
