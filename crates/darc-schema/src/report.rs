//! # Check Reports
//!
//! Aggregated outcome of a check run. A run passes iff every document has
//! zero violations; there is no partial-success state.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::validate::Violation;

/// Leading line of the message attached to a failing run.
pub const FAILURE_HEADLINE: &str =
    "Some JSON schemas are not valid against the official draft schema:";

/// Violations found in a single schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    path: PathBuf,
    violations: Vec<Violation>,
}

impl DocumentReport {
    pub fn new(path: PathBuf, violations: Vec<Violation>) -> Self {
        Self { path, violations }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// A document is valid iff it has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome of checking every selected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    success: bool,
    documents_checked: usize,
    documents: Vec<DocumentReport>,
}

impl CheckReport {
    /// Build a report from per-document results, in selection order.
    pub fn from_documents(documents: Vec<DocumentReport>) -> Self {
        Self {
            success: documents.iter().all(DocumentReport::is_valid),
            documents_checked: documents.len(),
            documents,
        }
    }

    /// True iff no document has a violation. Vacuously true when empty.
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn documents_checked(&self) -> usize {
        self.documents_checked
    }

    pub fn documents(&self) -> &[DocumentReport] {
        &self.documents
    }

    /// Documents with at least one violation.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.is_valid())
    }

    /// Total number of violations across all documents.
    pub fn violation_count(&self) -> usize {
        self.documents.iter().map(|d| d.violations.len()).sum()
    }

    /// Render every failing document followed by its violations.
    ///
    /// Empty for a successful run.
    pub fn render_failures(&self) -> String {
        let mut out = String::new();
        for doc in self.failures() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "Validation errors in {}:", doc.path.display());
            for violation in &doc.violations {
                let _ = writeln!(out, "  - {violation}");
            }
        }
        out
    }

    /// Assertion message for a failing run: headline plus rendered failures.
    pub fn failure_summary(&self) -> String {
        format!("{FAILURE_HEADLINE}\n{}", self.render_failures())
    }
}
