//! # Error Types
//!
//! Every variant here aborts the run. Meta-schema violations are not errors;
//! they are reported through [`crate::CheckReport`].
//!
//! - Precondition failures: the schema root cannot be walked, or the
//!   meta-schema cannot be obtained or compiled.
//! - Document failures: a selected file cannot be read or is not
//!   well-formed JSON.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error raised by a schema check run.
#[derive(Error, Debug)]
pub enum SchemaCheckError {
    /// The schema root is missing, unreadable, or a directory under it
    /// could not be traversed.
    #[error("cannot walk schema root '{}': {source}", root.display())]
    Walk {
        /// Root directory of the walk.
        root: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// The HTTP request for the meta-schema failed before a response
    /// was received (unreachable host, timeout, TLS failure).
    #[error("failed to fetch meta-schema from {url}: {source}")]
    MetaSchemaFetch {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The meta-schema server answered with a status other than 200.
    #[error("meta-schema request to {url} returned HTTP {status}")]
    MetaSchemaStatus {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// A vendored meta-schema file could not be read.
    #[error("cannot read meta-schema file '{}': {source}", path.display())]
    MetaSchemaRead {
        /// Path of the meta-schema file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The meta-schema content is not a usable JSON Schema document.
    #[error("malformed meta-schema from {origin}: {reason}")]
    MetaSchemaMalformed {
        /// URL or file path the content came from.
        origin: String,
        /// What is wrong with the content.
        reason: String,
    },

    /// The meta-schema parsed but the validation engine rejected it.
    #[error("cannot compile meta-schema: {reason}")]
    MetaSchemaCompile {
        /// Engine error message.
        reason: String,
    },

    /// A selected schema document could not be read.
    #[error("cannot read schema document '{}': {source}", path.display())]
    DocumentRead {
        /// Path of the document.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A selected schema document is not well-formed JSON.
    #[error("schema document '{}' is not valid JSON: {source}", path.display())]
    DocumentParse {
        /// Path of the document.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {var}: {reason}")]
    Config {
        /// Environment variable name.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SchemaCheckError {
    /// True for failures that happen before any document is judged.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Walk { .. }
                | Self::MetaSchemaFetch { .. }
                | Self::MetaSchemaStatus { .. }
                | Self::MetaSchemaRead { .. }
                | Self::MetaSchemaMalformed { .. }
                | Self::MetaSchemaCompile { .. }
                | Self::Config { .. }
        )
    }
}
