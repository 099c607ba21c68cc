//! # darc-schema — Meta-Schema Conformance Checking
//!
//! Verifies that every JSON Schema under the data-archive schema tree is
//! itself a structurally valid JSON Schema Draft 2020-12 document.
//!
//! ## Pipeline
//!
//! 1. [`select`] walks the schema root and picks every `.json` file whose
//!    path does not contain `_shared` (shared `$ref` fragments are not
//!    top-level documents).
//! 2. [`meta`] acquires the official Draft 2020-12 meta-schema, by default
//!    from `https://json-schema.org/draft/2020-12/schema`, and compiles it.
//! 3. [`validate`] parses each selected document and collects every
//!    meta-schema violation.
//! 4. [`report`] aggregates per-document results into a binary pass/fail
//!    [`CheckReport`] with a human-readable rendering.
//!
//! [`check::run_check`] drives the whole pipeline from a [`CheckConfig`].
//!
//! ## Failure Classes
//!
//! - Precondition failures (missing root, meta-schema unavailable) and
//!   parse failures abort the run with a [`SchemaCheckError`].
//! - Meta-schema non-conformance is not an error: it is collected into the
//!   [`CheckReport`], which the caller asserts on.

pub mod check;
pub mod config;
pub mod error;
pub mod meta;
pub mod report;
pub mod select;
pub mod validate;

pub use check::{check_files, run_check};
pub use config::{CheckConfig, DEFAULT_SCHEMA_ROOT};
pub use error::SchemaCheckError;
pub use meta::{MetaSchema, MetaSchemaSource, DRAFT_2020_12_META_SCHEMA_URL};
pub use report::{CheckReport, DocumentReport};
pub use select::{find_schema_files, is_schema_candidate};
pub use validate::Violation;
