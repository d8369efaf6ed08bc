//! `nacform` command line.
//!
//! Every subcommand produces one JSON document; [`run`] returns it and the
//! binary prints it to stdout. Diagnostics go to stderr through `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use nacform_core::catalog::{actions, conditions};
use nacform_core::{
    attributes_from_meta, defaults_from_meta, i18n, validators_from_meta, Catalog, DeriveOptions,
    RecordContext, SchemaMap,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Derive form attributes, defaults, and validators from a schema document.
#[derive(Debug, Parser)]
#[command(name = "nacform", version, about)]
pub struct CliConfig {
    /// Schema mapping (JSON) the derivations read.
    #[arg(long, env = "NACFORM_SCHEMA", global = true)]
    pub schema: Option<PathBuf>,

    /// Log output format on stderr.
    #[arg(
        long,
        env = "NACFORM_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Renderer attribute hints of a field.
    Attrs {
        /// Field key, dot-separated for nested settings.
        key: String,
    },
    /// Flat default values of every field.
    Defaults,
    /// Validator rules of a field, keyed by message.
    Validators {
        key: String,
        /// Label used in the "required" message.
        #[arg(long, default_value = "Value")]
        label: String,
    },
    /// Validates a value against the rules of a field.
    Check {
        key: String,
        /// JSON value; text that is not valid JSON is taken as a string.
        value: String,
        #[arg(long, default_value = "Value")]
        label: String,
    },
    /// Action catalog.
    Actions,
    /// Authentication condition catalog.
    Conditions,
    /// Supported locales.
    Locales,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Installs the stderr subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Executes the configured subcommand.
///
/// # Errors
///
/// Fails when the schema cannot be read or parsed, when a subcommand that
/// needs a schema runs without one, or when the schema has an authoring
/// error on the requested field.
pub fn run(config: &CliConfig) -> Result<Value> {
    let t = Catalog::english();
    let output = match &config.command {
        Command::Attrs { key } => {
            let meta = load_schema(config.schema.as_deref())?;
            serde_json::to_value(attributes_from_meta(&meta, key))?
        }
        Command::Defaults => {
            let meta = load_schema(config.schema.as_deref())?;
            serde_json::to_value(defaults_from_meta(&meta))?
        }
        Command::Validators { key, label } => {
            let meta = load_schema(config.schema.as_deref())?;
            let rules = validators_from_meta(&meta, key, &DeriveOptions::with_label(label), &t)
                .with_context(|| format!("deriving validators for `{key}`"))?;
            serde_json::to_value(&rules)?
        }
        Command::Check { key, value, label } => {
            let meta = load_schema(config.schema.as_deref())?;
            let rules = validators_from_meta(&meta, key, &DeriveOptions::with_label(label), &t)
                .with_context(|| format!("deriving validators for `{key}`"))?;
            let value = parse_value(value);
            let failures = rules.failures(&value, &RecordContext::default());
            tracing::debug!(key = %key, failures = failures.len(), "checked value");
            json!({
                "key": key,
                "value": value,
                "valid": failures.is_empty(),
                "failures": failures,
            })
        }
        Command::Actions => serde_json::to_value(actions::actions())?,
        Command::Conditions => serde_json::to_value(conditions::conditions())?,
        Command::Locales => serde_json::to_value(i18n::locale_options())?,
    };
    Ok(output)
}

fn load_schema(path: Option<&Path>) -> Result<SchemaMap> {
    let Some(path) = path else {
        bail!("no schema given: pass --schema or set NACFORM_SCHEMA");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let meta = SchemaMap::from_json(&text)
        .with_context(|| format!("parsing schema {}", path.display()))?;
    tracing::debug!(path = %path.display(), fields = meta.len(), "loaded schema");
    Ok(meta)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
