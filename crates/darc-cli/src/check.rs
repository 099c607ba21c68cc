//! # Check and List Subcommands
//!
//! Configuration precedence: command-line flags, then `DARC_*` environment
//! variables, then the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use darc_schema::config::parse_url;
use darc_schema::meta::DEFAULT_FETCH_TIMEOUT;
use darc_schema::{find_schema_files, run_check, CheckConfig, CheckReport, MetaSchemaSource};

use crate::{EXIT_OK, EXIT_VIOLATIONS};

/// Report rendering on stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Failing files followed by their violations.
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Arguments for the `darc-schema check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema root to walk [default: schemas/data-archive].
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Fetch the meta-schema from this URL.
    #[arg(long, value_name = "URL", conflicts_with = "meta_schema_file")]
    pub meta_schema_url: Option<String>,

    /// Read the meta-schema from a local file instead of fetching it.
    #[arg(long, value_name = "PATH")]
    pub meta_schema_file: Option<PathBuf>,

    /// Timeout for the meta-schema request, in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `darc-schema list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Schema root to walk [default: schemas/data-archive].
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,
}

/// Merge flags over the environment-derived configuration.
pub fn resolve_config(args: &CheckArgs, base: CheckConfig) -> Result<CheckConfig> {
    let mut config = base;

    if let Some(ref root) = args.root {
        config = config.with_root(root.clone());
    }

    if let Some(ref path) = args.meta_schema_file {
        config = config.with_meta_schema(MetaSchemaSource::File(path.clone()));
    } else if let Some(ref raw) = args.meta_schema_url {
        let url = parse_url("--meta-schema-url", raw)?;
        let timeout = match config.meta_schema {
            MetaSchemaSource::Remote { timeout, .. } => timeout,
            MetaSchemaSource::File(_) => DEFAULT_FETCH_TIMEOUT,
        };
        config = config.with_meta_schema(MetaSchemaSource::Remote {
            url: url.to_string(),
            timeout,
        });
    }

    if let Some(secs) = args.timeout_secs {
        if let MetaSchemaSource::Remote { ref mut timeout, .. } = config.meta_schema {
            *timeout = Duration::from_secs(secs);
        } else {
            tracing::warn!("--timeout-secs has no effect with a meta-schema file");
        }
    }

    Ok(config)
}

/// Render a report for stdout.
pub fn render_report(report: &CheckReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize check report")
        }
        OutputFormat::Text if report.is_success() => Ok(format!(
            "OK: {} schema document(s) conform to the meta-schema",
            report.documents_checked()
        )),
        OutputFormat::Text => Ok(format!(
            "{}\n{} of {} schema document(s) failed validation.",
            report.failure_summary().trim_end(),
            report.failures().count(),
            report.documents_checked()
        )),
    }
}

/// Execute the check subcommand.
///
/// Returns exit code 0 when every document conforms and 1 when violations
/// were found. Aborted runs surface as `Err`.
pub fn run_check_command(args: &CheckArgs) -> Result<u8> {
    let base = CheckConfig::from_env().context("invalid DARC_* environment configuration")?;
    let config = resolve_config(args, base)?;

    tracing::debug!(
        root = %config.root.display(),
        meta_schema = %config.meta_schema,
        "resolved check configuration"
    );

    let report = run_check(&config)
        .with_context(|| format!("schema check of {} aborted", config.root.display()))?;

    println!("{}", render_report(&report, args.format)?);

    if report.is_success() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_VIOLATIONS)
    }
}

/// Execute the list subcommand: print every selected document.
pub fn run_list_command(args: &ListArgs) -> Result<u8> {
    let root = match args.root {
        Some(ref root) => root.clone(),
        None => {
            CheckConfig::from_env()
                .context("invalid DARC_* environment configuration")?
                .root
        }
    };

    let files = find_schema_files(&root)
        .with_context(|| format!("cannot list schemas under {}", root.display()))?;
    for path in &files {
        println!("{}", path.display());
    }
    tracing::info!(count = files.len(), "listed schema documents");
    Ok(EXIT_OK)
}
