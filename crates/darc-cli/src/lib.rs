//! # darc-cli — Schema Check Command-Line Interface
//!
//! Provides the `darc-schema` binary, a standalone surface for the same
//! check the workspace test suite runs.
//!
//! ## Subcommands
//!
//! - `darc-schema check [ROOT]` — validate every schema document under the
//!   root against the Draft 2020-12 meta-schema.
//! - `darc-schema list [ROOT]` — print the documents a check would cover.
//!
//! ## Exit Codes
//!
//! - `0` — every document conforms.
//! - `1` — at least one document has meta-schema violations.
//! - `2` — the run aborted (missing root, meta-schema unavailable,
//!   malformed document).
//!
//! Argument parsing lives here; checking logic lives in `darc-schema`.

pub mod check;

/// All documents conform.
pub const EXIT_OK: u8 = 0;
/// Meta-schema violations were found.
pub const EXIT_VIOLATIONS: u8 = 1;
/// The run aborted before a verdict.
pub const EXIT_ERROR: u8 = 2;
