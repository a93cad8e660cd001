//! Schema Migration CLI
//!
//! Converts legacy document-class configurations to JSON Schema format,
//! detects which format a document is in, and reports on migration results.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use docket_schemas::config::{InputFormat, OutputFormat};
use docket_schemas::constants::CLASSES_KEY;
use docket_schemas::{
    is_legacy_format, is_schema_format, migrate_config_document, MigrateConfig,
};

#[derive(Parser)]
#[command(name = "schema-migrate")]
#[command(about = "Migrate legacy document-class configurations to JSON Schema")]
struct Cli {
    /// Path to a config file (docket.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a configuration document if it is in legacy format
    Convert {
        /// Input configuration document (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output rendering: pretty or compact (defaults to the configured format)
        #[arg(long)]
        format: Option<String>,
    },

    /// Print whether a document is in legacy or schema format
    Detect {
        /// Input configuration document (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate a migration report
    Report {
        /// Input configuration document (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = MigrateConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
        } => {
            let document = load_document(&input, config.input.format)?;
            let migrated = migrate_config_document(&document)?;

            let format = resolve_format(format.as_deref(), config.output.format)?;
            let rendered = render(&migrated, format)?;

            if let Some(path) = output {
                std::fs::write(&path, &rendered)?;
                if migrated == document {
                    println!("✅ Already in schema format, written unchanged to {:?}", path);
                } else {
                    println!("✅ Migrated configuration written to {:?}", path);
                }
            } else {
                println!("{}", rendered);
            }
            Ok(())
        }

        Commands::Detect { input } => {
            let document = load_document(&input, config.input.format)?;

            if is_legacy_format(&document) {
                println!("legacy");
            } else if is_schema_format(&document) {
                println!("schema");
            } else {
                println!("unknown");
            }
            Ok(())
        }

        Commands::Report { input, output } => {
            let document = load_document(&input, config.input.format)?;

            let source_format = if is_legacy_format(&document) {
                "legacy"
            } else if is_schema_format(&document) {
                "schema"
            } else {
                "unknown"
            };
            let migrated = migrate_config_document(&document)?;

            let mut report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "source_format": source_format,
                "migrated": migrated != document,
                "document_types": [],
                "schemas": {}
            });

            for schema in schema_documents(&migrated) {
                let id = schema
                    .get("$id")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                report["document_types"]
                    .as_array_mut()
                    .expect("document_types is an array")
                    .push(Value::from(id));
                report["schemas"][id] = serde_json::json!({
                    "properties": object_len(schema.get("properties")),
                    "defs": object_len(schema.get("$defs")),
                    "examples": schema
                        .get("examples")
                        .and_then(Value::as_array)
                        .map(|examples| examples.len())
                        .unwrap_or(0),
                });
            }

            let report_json = serde_json::to_string_pretty(&report)?;

            if let Some(path) = output {
                std::fs::write(&path, &report_json)?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }
            Ok(())
        }
    }
}

/// Reads and parses one configuration document. Auto format tries JSON
/// first and falls back to YAML, the order stored documents historically
/// came in.
fn load_document(path: &Path, format: InputFormat) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    match format {
        InputFormat::Json => serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON in {}: {}", path.display(), e)),
        InputFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML in {}: {}", path.display(), e)),
        InputFormat::Auto => serde_json::from_str(&content).or_else(|_| {
            serde_yaml::from_str(&content).map_err(|_| {
                anyhow::anyhow!("{} is neither valid JSON nor valid YAML", path.display())
            })
        }),
    }
}

/// Resolves the requested output rendering against the configured default.
fn resolve_format(
    requested: Option<&str>,
    configured: OutputFormat,
) -> anyhow::Result<OutputFormat> {
    match requested {
        None => Ok(configured),
        Some("pretty") => Ok(OutputFormat::Pretty),
        Some("compact") => Ok(OutputFormat::Compact),
        Some(other) => Err(anyhow::anyhow!(
            "Unknown output format '{}': expected pretty or compact",
            other
        )),
    }
}

fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

/// The schema documents inside a migrated payload: a bare array, the
/// `classes` section of a wrapped configuration, or the value itself.
fn schema_documents(document: &Value) -> Vec<&Value> {
    match document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => match obj.get(CLASSES_KEY).and_then(Value::as_array) {
            Some(classes) => classes.iter().collect(),
            None => vec![document],
        },
        _ => Vec::new(),
    }
}

/// Entry count of an optional JSON object, zero when absent or not a map.
fn object_len(value: Option<&Value>) -> usize {
    value
        .and_then(Value::as_object)
        .map(|entries| entries.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_arguments_are_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_takes_named_input_and_format() {
        let cli = Cli::try_parse_from([
            "schema-migrate",
            "convert",
            "--input",
            "classes.json",
            "--format",
            "compact",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert { input, format, .. } => {
                assert_eq!(input, PathBuf::from("classes.json"));
                assert_eq!(format.as_deref(), Some("compact"));
            }
            _ => panic!("Expected the convert subcommand"),
        }
    }

    #[test]
    fn test_config_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "schema-migrate",
            "detect",
            "--input",
            "classes.yaml",
            "--config",
            "docket.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("docket.toml"));
    }

    #[test]
    fn test_format_resolution_rejects_unknown_values() {
        assert_eq!(
            resolve_format(None, OutputFormat::Compact).unwrap(),
            OutputFormat::Compact
        );
        assert_eq!(
            resolve_format(Some("pretty"), OutputFormat::Compact).unwrap(),
            OutputFormat::Pretty
        );
        assert_eq!(
            resolve_format(Some("compact"), OutputFormat::Pretty).unwrap(),
            OutputFormat::Compact
        );
        assert!(resolve_format(Some("yaml"), OutputFormat::Pretty).is_err());
    }
}
