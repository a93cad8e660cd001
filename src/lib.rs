//! Docket Schema Migration
//!
//! Migrates legacy flat-attribute document-class configurations into
//! normalized JSON Schema documents for the Docket extraction platform,
//! deterministically and idempotently.
//!
//! ## Features
//!
//! - **Format Detection**: Structural predicates that tell legacy and
//!   normalized payloads apart, with normalized markers winning ties
//! - **Attribute Conversion**: Simple, group, and list attributes mapped to
//!   string, object, and array schema properties
//! - **Extension Validation**: `x-docket-*` evaluation and prompt overrides
//!   checked as they are copied; the engine's only hard errors
//! - **Reference Hoisting**: Shared component classes embedded under `$defs`
//!   of each document type that reaches them
//! - **Example Mining**: Few-shot examples carried across, with structured
//!   values recovered from free-text prompts on a best-effort basis
//!
//! ## Architecture
//!
//! ```text
//! raw JSON ──► detect ──► legacy model ──► attributes ──► intermediate
//!                              │                              classes
//!                              └──► few-shot examples ──────────┤
//!                                                               ▼
//!                 schema documents ◄── assemble ◄── $ref resolution
//! ```

pub mod migration;
pub mod detect;
pub mod legacy;
pub mod constants;
pub mod config;
pub mod error;

pub use migration::{
    assemble_schemas, find_referenced_classes, migrate_attribute, migrate_config_document,
    migrate_examples, migrate_if_legacy, migrate_legacy_to_schema,
};
pub use detect::{is_legacy_format, is_schema_format};
pub use legacy::{LegacyAttribute, LegacyClass, LegacyExample};
pub use config::MigrateConfig;
pub use error::{MigrationError, Result};
