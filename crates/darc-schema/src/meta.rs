//! # Meta-Schema Acquisition
//!
//! Obtains the JSON Schema Draft 2020-12 meta-schema and compiles it into a
//! reusable validator.
//!
//! The canonical source is a live HTTP fetch of
//! `https://json-schema.org/draft/2020-12/schema`. A local file can be
//! configured instead; it is never used as an automatic fallback when the
//! fetch fails. Without the meta-schema no document can be judged, so every
//! failure here aborts the run.
//!
//! The top-level document references the vocabulary meta-schemas
//! (`meta/core`, `meta/applicator`, ...). Those resolve through the
//! `jsonschema` crate's bundled specification registry, so only one request
//! is made per run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jsonschema::Validator;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::SchemaCheckError;

/// Canonical location of the Draft 2020-12 meta-schema.
pub const DRAFT_2020_12_META_SCHEMA_URL: &str = "https://json-schema.org/draft/2020-12/schema";

/// Request timeout applied to the meta-schema fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the meta-schema document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaSchemaSource {
    /// Blocking HTTP GET.
    Remote {
        /// Absolute URL of the meta-schema.
        url: String,
        /// Overall request timeout.
        timeout: Duration,
    },
    /// Vendored copy on disk.
    File(PathBuf),
}

impl Default for MetaSchemaSource {
    fn default() -> Self {
        Self::Remote {
            url: DRAFT_2020_12_META_SCHEMA_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl fmt::Display for MetaSchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url, .. } => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the raw meta-schema document from `source`.
///
/// # Errors
///
/// - [`SchemaCheckError::MetaSchemaFetch`] if the request cannot complete.
/// - [`SchemaCheckError::MetaSchemaStatus`] for any status other than 200.
/// - [`SchemaCheckError::MetaSchemaRead`] if a configured file cannot be read.
/// - [`SchemaCheckError::MetaSchemaMalformed`] if the content is not a JSON
///   object.
pub fn load_meta_schema(source: &MetaSchemaSource) -> Result<Value, SchemaCheckError> {
    match source {
        MetaSchemaSource::Remote { url, timeout } => fetch_meta_schema(url, *timeout),
        MetaSchemaSource::File(path) => read_meta_schema(path),
    }
}

fn fetch_meta_schema(url: &str, timeout: Duration) -> Result<Value, SchemaCheckError> {
    let fetch_err = |source: reqwest::Error| SchemaCheckError::MetaSchemaFetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;

    tracing::debug!(url, timeout_secs = timeout.as_secs(), "fetching meta-schema");

    let response = client
        .get(url)
        .header(ACCEPT, "application/schema+json, application/json")
        .send()
        .map_err(fetch_err)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SchemaCheckError::MetaSchemaStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(fetch_err)?;
    parse_meta_schema(&body, url)
}

fn read_meta_schema(path: &Path) -> Result<Value, SchemaCheckError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| SchemaCheckError::MetaSchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
    parse_meta_schema(&content, &path.display().to_string())
}

/// Parse meta-schema text, requiring a top-level JSON object.
fn parse_meta_schema(content: &str, origin: &str) -> Result<Value, SchemaCheckError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| SchemaCheckError::MetaSchemaMalformed {
            origin: origin.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;

    if !value.is_object() {
        return Err(SchemaCheckError::MetaSchemaMalformed {
            origin: origin.to_string(),
            reason: "expected a JSON object at the top level".to_string(),
        });
    }

    Ok(value)
}

/// A compiled Draft 2020-12 meta-schema.
///
/// Immutable once built; one instance serves every document in a run.
pub struct MetaSchema {
    document: Value,
    pub(crate) validator: Validator,
}

impl fmt::Debug for MetaSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaSchema")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

impl MetaSchema {
    /// Load the meta-schema from `source` and compile it.
    pub fn acquire(source: &MetaSchemaSource) -> Result<Self, SchemaCheckError> {
        let document = load_meta_schema(source)?;
        let meta = Self::compile(document)?;
        tracing::info!(
            source = %source,
            id = meta.id().unwrap_or("<none>"),
            "meta-schema ready"
        );
        Ok(meta)
    }

    /// Compile an already-loaded meta-schema document.
    ///
    /// Format assertion is switched on so that keywords such as `pattern`
    /// (declared with `"format": "regex"`) reject malformed values instead
    /// of only annotating them.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCheckError::MetaSchemaCompile`] if the engine rejects
    /// the document.
    pub fn compile(document: Value) -> Result<Self, SchemaCheckError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);

        let validator = opts
            .build(&document)
            .map_err(|e| SchemaCheckError::MetaSchemaCompile {
                reason: e.to_string(),
            })?;

        Ok(Self {
            document,
            validator,
        })
    }

    /// The `$id` declared by the meta-schema, if any.
    pub fn id(&self) -> Option<&str> {
        self.document.get("$id").and_then(Value::as_str)
    }

    /// The raw meta-schema document.
    pub fn document(&self) -> &Value {
        &self.document
    }
}
