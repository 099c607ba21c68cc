//! Check run configuration.
//!
//! Defaults reproduce the reference setup: schemas under
//! `schemas/data-archive` relative to the working directory, meta-schema
//! fetched from json-schema.org. Override via environment variables or
//! explicit construction.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::SchemaCheckError;
use crate::meta::{MetaSchemaSource, DEFAULT_FETCH_TIMEOUT, DRAFT_2020_12_META_SCHEMA_URL};

/// Schema root used when nothing else is configured.
pub const DEFAULT_SCHEMA_ROOT: &str = "schemas/data-archive";

pub const ENV_SCHEMA_ROOT: &str = "DARC_SCHEMA_ROOT";
pub const ENV_META_SCHEMA_URL: &str = "DARC_META_SCHEMA_URL";
pub const ENV_META_SCHEMA_FILE: &str = "DARC_META_SCHEMA_FILE";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DARC_FETCH_TIMEOUT_SECS";

/// Inputs of a single check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Directory walked for schema documents.
    pub root: PathBuf,
    /// Where the meta-schema comes from.
    pub meta_schema: MetaSchemaSource,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SCHEMA_ROOT),
            meta_schema: MetaSchemaSource::default(),
        }
    }
}

impl CheckConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DARC_SCHEMA_ROOT` (default: `schemas/data-archive`)
    /// - `DARC_META_SCHEMA_URL` (default: `https://json-schema.org/draft/2020-12/schema`)
    /// - `DARC_META_SCHEMA_FILE` (unset by default; when set, the meta-schema
    ///   is read from this file and the URL is ignored)
    /// - `DARC_FETCH_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, SchemaCheckError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`CheckConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchemaCheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup(ENV_SCHEMA_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_ROOT));

        let meta_schema = match lookup(ENV_META_SCHEMA_FILE) {
            Some(path) => MetaSchemaSource::File(PathBuf::from(path)),
            None => {
                let raw = lookup(ENV_META_SCHEMA_URL)
                    .unwrap_or_else(|| DRAFT_2020_12_META_SCHEMA_URL.to_string());
                let url = parse_url(ENV_META_SCHEMA_URL, &raw)?;
                let timeout = match lookup(ENV_FETCH_TIMEOUT_SECS) {
                    Some(raw) => parse_timeout(ENV_FETCH_TIMEOUT_SECS, &raw)?,
                    None => DEFAULT_FETCH_TIMEOUT,
                };
                MetaSchemaSource::Remote {
                    url: url.to_string(),
                    timeout,
                }
            }
        };

        Ok(Self { root, meta_schema })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_meta_schema(mut self, source: MetaSchemaSource) -> Self {
        self.meta_schema = source;
        self
    }
}

/// Validate a meta-schema URL. Only `http` and `https` are accepted.
pub fn parse_url(var: &str, raw: &str) -> Result<Url, SchemaCheckError> {
    let url = Url::parse(raw).map_err(|e| SchemaCheckError::Config {
        var: var.to_string(),
        reason: format!("'{raw}' is not a valid URL: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SchemaCheckError::Config {
            var: var.to_string(),
            reason: format!("unsupported URL scheme '{other}'"),
        }),
    }
}

/// Parse a timeout in whole seconds. Zero is rejected.
pub fn parse_timeout(var: &str, raw: &str) -> Result<Duration, SchemaCheckError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(SchemaCheckError::Config {
            var: var.to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(SchemaCheckError::Config {
            var: var.to_string(),
            reason: format!("'{raw}' is not a number of seconds: {e}"),
        }),
    }
}
