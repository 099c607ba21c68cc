//! # Check Runner
//!
//! Drives a full run: select documents, acquire the meta-schema, validate
//! each document, aggregate.
//!
//! Selection happens first so that a missing schema root is reported
//! without touching the network. Any error aborts the run with no partial
//! report.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::CheckConfig;
use crate::error::SchemaCheckError;
use crate::meta::MetaSchema;
use crate::report::CheckReport;
use crate::select::find_schema_files;

/// Run a complete check as described by `config`.
///
/// # Errors
///
/// Returns the first precondition or document error encountered.
/// Meta-schema violations are not errors; inspect
/// [`CheckReport::is_success`].
pub fn run_check(config: &CheckConfig) -> Result<CheckReport, SchemaCheckError> {
    let files = find_schema_files(&config.root)?;
    tracing::info!(
        root = %config.root.display(),
        documents = files.len(),
        "selected schema documents"
    );

    let meta = MetaSchema::acquire(&config.meta_schema)?;
    check_files(&meta, &files)
}

/// Validate an already-selected set of documents against `meta`.
pub fn check_files(
    meta: &MetaSchema,
    files: &BTreeSet<PathBuf>,
) -> Result<CheckReport, SchemaCheckError> {
    let mut documents = Vec::with_capacity(files.len());

    for path in files {
        let document = meta.validate_file(path)?;
        if !document.is_valid() {
            tracing::warn!(
                path = %path.display(),
                violations = document.violations().len(),
                "schema document does not conform to the meta-schema"
            );
        }
        documents.push(document);
    }

    let report = CheckReport::from_documents(documents);
    tracing::info!(
        checked = report.documents_checked(),
        failed = report.failures().count(),
        violations = report.violation_count(),
        "schema check complete"
    );
    Ok(report)
}
