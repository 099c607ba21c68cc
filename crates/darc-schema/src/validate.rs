//! # Document Validation
//!
//! Checks parsed schema documents against the compiled meta-schema.
//!
//! Every violation is collected; validation never stops at the first one.
//! Unreadable or malformed documents are fatal errors rather than
//! violations, so a broken file can never be mistaken for a conformance
//! failure (or hidden behind one).

use std::fmt;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaCheckError;
use crate::meta::MetaSchema;
use crate::report::DocumentReport;

/// A single meta-schema violation within one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending value in the document.
    pub instance_path: String,
    /// JSON Pointer to the meta-schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

impl MetaSchema {
    /// Validate a parsed document, returning every violation found.
    ///
    /// An empty vector means the document conforms.
    pub fn validate_value(&self, document: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(document)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Read, parse and validate the schema document at `path`.
    ///
    /// # Errors
    ///
    /// - [`SchemaCheckError::DocumentRead`] if the file cannot be read.
    /// - [`SchemaCheckError::DocumentParse`] if it is not well-formed JSON.
    pub fn validate_file(&self, path: &Path) -> Result<DocumentReport, SchemaCheckError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SchemaCheckError::DocumentRead {
                path: path.to_path_buf(),
                source,
            })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|source| SchemaCheckError::DocumentParse {
                path: path.to_path_buf(),
                source,
            })?;

        let violations = self.validate_value(&document);
        tracing::debug!(
            path = %path.display(),
            violations = violations.len(),
            "validated schema document"
        );

        Ok(DocumentReport::new(path.to_path_buf(), violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaSchemaSource;
    use serde_json::json;
    use std::path::PathBuf;

    fn meta() -> MetaSchema {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.pop(); // crates/
        path.pop(); // repo root
        MetaSchema::acquire(&MetaSchemaSource::File(
            path.join("schemas/meta/draft-2020-12-schema.json"),
        ))
        .unwrap()
    }

    #[test]
    fn conformant_schema_has_no_violations() {
        let doc = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object"
        });
        assert!(meta().validate_value(&doc).is_empty());
    }

    #[test]
    fn richer_conformant_schema_has_no_violations() {
        let doc = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$id": "https://example.org/record.json",
            "title": "Record",
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "string", "pattern": "^[a-z0-9-]+$" },
                "tags": { "type": "array", "items": { "type": "string" }, "uniqueItems": true },
                "agent": { "$ref": "_shared/agent.json" }
            },
            "$defs": {
                "date": { "type": "string", "format": "date" }
            },
            "additionalProperties": false
        });
        let violations = meta().validate_value(&doc);
        assert!(violations.is_empty(), "unexpected violations: {violations:?}");
    }

    #[test]
    fn numeric_type_is_a_violation() {
        let doc = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": 5
        });
        let violations = meta().validate_value(&doc);
        assert!(!violations.is_empty());
        assert!(
            violations.iter().any(|v| v.instance_path == "/type"),
            "expected a violation at /type, got: {violations:?}"
        );
    }

    #[test]
    fn independent_violations_are_all_reported() {
        let doc = json!({
            "type": 5,
            "properties": {
                "code": { "type": "string", "pattern": "[unclosed" }
            }
        });
        let violations = meta().validate_value(&doc);
        assert!(
            violations.iter().any(|v| v.instance_path == "/type"),
            "missing /type violation: {violations:?}"
        );
        assert!(
            violations
                .iter()
                .any(|v| v.instance_path == "/properties/code/pattern"),
            "missing pattern violation: {violations:?}"
        );
    }

    #[test]
    fn nested_subschemas_are_checked() {
        let doc = json!({
            "type": "object",
            "properties": {
                "count": { "type": "integer", "minimum": "zero" }
            }
        });
        let violations = meta().validate_value(&doc);
        assert!(
            violations
                .iter()
                .any(|v| v.instance_path == "/properties/count/minimum"),
            "expected nested violation, got: {violations:?}"
        );
    }

    #[test]
    fn validate_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, br#"{"required": "id"}"#).unwrap();

        let report = meta().validate_file(&path).unwrap();
        assert_eq!(report.path(), path.as_path());
        assert!(!report.is_valid());
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"type\": \"object\",").unwrap();

        let err = meta().validate_file(&path).unwrap_err();
        match err {
            SchemaCheckError::DocumentParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected DocumentParse, got: {other}"),
        }
    }

    #[test]
    fn violation_display_formats() {
        let nested = Violation {
            instance_path: "/properties/id/type".to_string(),
            schema_path: "/allOf/3/$ref/properties/type/anyOf".to_string(),
            message: "\"strin\" is not valid under any of the schemas listed in the 'anyOf' keyword"
                .to_string(),
        };
        assert!(nested.to_string().starts_with("/properties/id/type: "));

        let root = Violation {
            instance_path: String::new(),
            schema_path: "/type".to_string(),
            message: "5 is not of types \"boolean\", \"object\"".to_string(),
        };
        assert!(root.to_string().starts_with("(root): "));
    }
}
